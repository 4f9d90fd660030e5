use crate::domain::language::LanguageCode;

/// Neural voice used for each output language with a hand-picked voice
const VOICE_MAP: &[(&str, &str)] = &[
    ("en-US", "en-US-JennyNeural"),
    ("es", "es-ES-ElviraNeural"),
    ("fr", "fr-FR-DeniseNeural"),
    ("de", "de-DE-KatjaNeural"),
    ("it", "it-IT-ElsaNeural"),
    ("pt", "pt-BR-FranciscaNeural"),
    ("zh-Hans", "zh-CN-XiaoxiaoNeural"),
    ("ja", "ja-JP-NanamiNeural"),
    ("ko", "ko-KR-SunHiNeural"),
    ("ru", "ru-RU-SvetlanaNeural"),
    ("ar", "ar-SA-ZariyahNeural"),
    ("hi", "hi-IN-SwaraNeural"),
    ("gu", "gu-IN-DhwaniNeural"),
];

/// Get the synthesis voice for an output language.
///
/// Unmapped codes fall back to `"<code>-Neural"`. That name is a best-effort
/// guess and often does not exist on the service; synthesis failures for such
/// languages are reported by the synthesizer, not hidden here.
pub fn resolve_voice(language: &LanguageCode) -> String {
    VOICE_MAP
        .iter()
        .find(|(code, _)| *code == language.as_str())
        .map(|(_, voice)| voice.to_string())
        .unwrap_or_else(|| format!("{}-Neural", language))
}

/// Whether the language has a hand-picked voice rather than the derived fallback
pub fn has_explicit_voice(language: &LanguageCode) -> bool {
    VOICE_MAP.iter().any(|(code, _)| *code == language.as_str())
}

/// Resolves output languages to voices for the synthesizer cache
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceProfileResolver;

impl VoiceProfileResolver {
    pub fn resolve(&self, language: &LanguageCode) -> String {
        let voice = resolve_voice(language);
        if !has_explicit_voice(language) {
            tracing::debug!(
                language = %language,
                voice = %voice,
                "No voice mapped for language, using derived voice name"
            );
        }
        voice
    }
}
