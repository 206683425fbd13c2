//! Fixed scenario battery fed to the agent under test.

use serde::{Deserialize, Serialize};

/// A single (request, expected capability) test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    /// Natural-language instruction passed verbatim to the agent.
    pub request_text: String,

    /// Capability label expected to handle the request.
    ///
    /// Reported alongside the outcome; never compared against the tool the
    /// agent actually invoked.
    pub expected_capability: String,
}

impl Scenario {
    /// Create a new scenario.
    pub fn new(request_text: impl Into<String>, expected_capability: impl Into<String>) -> Self {
        Self {
            request_text: request_text.into(),
            expected_capability: expected_capability.into(),
        }
    }
}

/// Ordered, read-only sequence of scenarios.
///
/// Positions are significant: reports number scenarios by their index here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// The builtin battery covering every tool registered on the agent.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(request, capability)| Scenario::new(*request, *capability))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }
}

impl FromIterator<Scenario> for ScenarioSet {
    fn from_iter<I: IntoIterator<Item = Scenario>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "Benim için './cca530fc-4052-43b2-b130-b30968d8aa44.png' konumundaki görseli incele. Sıranın siyah taşlarda olduğunu düşünerek olası en iyi sonraki hamleyi verirmisin? ",
        "caption_image_func",
    ),
    (
        "İstanbul'daki hava kirliliği son durumu nedir?,İnternette araştırıp bulduğun sonuçları kısaca değerlendirirmisin",
        "general_web_search",
    ),
    (
        "En son 2024'te yayınlanan biyolojik yapay zeka makaleleri hakkında bilgi ver.",
        "academic_search",
    ),
    (
        "Avrupa Birliği'nin kurucusu kimdir ve kaç yılında kurulmuştur? Bu konudaki Wikipedia bilgilerini özetlermisin",
        "wikipedia_search",
    ),
    ("Tokyo'da şu an hava nasıl?", "WeatherInfoTool"),
    (
        "Büyük bir matematik sorusu: 174.5 ile 93.2 sayılarının çarpımı kaçtır?",
        "multiply_func",
    ),
    (
        "Büyük bir hesaplama sorusu: 5000 sayısını 125'e bölüp, sonucu 17 ile topla.",
        "div_func",
    ),
    (
        "Şu Python kodunu çalıştır ve sonucu söyle: print(len(['a', 'b', 'c'] * 5))",
        "python_repl_tool",
    ),
    (
        "Bu YouTube URL'sindeki (https://www.youtube.com/watch?v=dQw4w9WgXcQ) videosunun transcriptini çıkar ve metni kısaca yorumla.",
        "youtube_transcript_func",
    ),
    (
        "Sürtünme gibi muhafazakar olmayan kuvvetler, neden aslında mikroskobik potansiyellerin sonuçları olarak kabul edilir?",
        "rag tool",
    ),
];
