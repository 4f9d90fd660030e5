use serde::Serialize;

/// A language selectable as recognition input or translation output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

impl LanguageOption {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

const LANGUAGES: &[LanguageOption] = &[
    LanguageOption::new("af", "Afrikaans"),
    LanguageOption::new("sq", "Albanian"),
    LanguageOption::new("am", "Amharic"),
    LanguageOption::new("ar", "Arabic"),
    LanguageOption::new("hy", "Armenian"),
    LanguageOption::new("as", "Assamese"),
    LanguageOption::new("az", "Azerbaijani"),
    LanguageOption::new("bn", "Bangla"),
    LanguageOption::new("bs", "Bosnian (Latin)"),
    LanguageOption::new("bg", "Bulgarian"),
    LanguageOption::new("yue", "Cantonese (Traditional)"),
    LanguageOption::new("ca", "Catalan"),
    LanguageOption::new("lzh", "Chinese (Literary)"),
    LanguageOption::new("zh-Hans", "Chinese Simplified"),
    LanguageOption::new("zh-Hant", "Chinese Traditional"),
    LanguageOption::new("hr", "Croatian"),
    LanguageOption::new("cs", "Czech"),
    LanguageOption::new("da", "Danish"),
    LanguageOption::new("prs", "Dari"),
    LanguageOption::new("nl", "Dutch"),
    LanguageOption::new("en-US", "English"),
    LanguageOption::new("et", "Estonian"),
    LanguageOption::new("fj", "Fijian"),
    LanguageOption::new("fil", "Filipino"),
    LanguageOption::new("fi", "Finnish"),
    LanguageOption::new("fr", "French"),
    LanguageOption::new("fr-ca", "French (Canada)"),
    LanguageOption::new("de", "German"),
    LanguageOption::new("el", "Greek"),
    LanguageOption::new("gu", "Gujarati"),
    LanguageOption::new("ht", "Haitian Creole"),
    LanguageOption::new("he", "Hebrew"),
    LanguageOption::new("hi-IN", "Hindi"),
    LanguageOption::new("mww", "Hmong Daw"),
    LanguageOption::new("hu", "Hungarian"),
    LanguageOption::new("is", "Icelandic"),
    LanguageOption::new("id", "Indonesian"),
    LanguageOption::new("iu", "Inuktitut"),
    LanguageOption::new("ga", "Irish"),
    LanguageOption::new("it", "Italian"),
    LanguageOption::new("ja", "Japanese"),
    LanguageOption::new("kn", "Kannada"),
    LanguageOption::new("kk", "Kazakh"),
    LanguageOption::new("km", "Khmer"),
    LanguageOption::new("tlh-Latn", "Klingon"),
    LanguageOption::new("tlh-Piqd", "Klingon (plqaD)"),
    LanguageOption::new("ko", "Korean"),
    LanguageOption::new("ku", "Kurdish (Central)"),
    LanguageOption::new("kmr", "Kurdish (Northern)"),
    LanguageOption::new("lo", "Lao"),
    LanguageOption::new("lv", "Latvian"),
    LanguageOption::new("lt", "Lithuanian"),
    LanguageOption::new("mg", "Malagasy"),
    LanguageOption::new("ms", "Malay"),
    LanguageOption::new("ml", "Malayalam"),
    LanguageOption::new("mt", "Maltese"),
    LanguageOption::new("mi", "Maori"),
    LanguageOption::new("mr", "Marathi"),
    LanguageOption::new("my", "Myanmar"),
    LanguageOption::new("ne", "Nepali"),
    LanguageOption::new("nb", "Norwegian"),
    LanguageOption::new("or", "Odia"),
    LanguageOption::new("ps", "Pashto"),
    LanguageOption::new("fa", "Persian"),
    LanguageOption::new("pl", "Polish"),
    LanguageOption::new("pt", "Portuguese (Brazil)"),
    LanguageOption::new("pt-pt", "Portuguese (Portugal)"),
    LanguageOption::new("pa", "Punjabi"),
    LanguageOption::new("otq", "Queretaro Otomi"),
    LanguageOption::new("ro", "Romanian"),
    LanguageOption::new("ru", "Russian"),
    LanguageOption::new("sm", "Samoan"),
    LanguageOption::new("sr-Cyrl", "Serbian (Cyrillic)"),
    LanguageOption::new("sr-Latn", "Serbian (Latin)"),
    LanguageOption::new("sk", "Slovak"),
    LanguageOption::new("sl", "Slovenian"),
    LanguageOption::new("es", "Spanish"),
    LanguageOption::new("sw", "Swahili"),
    LanguageOption::new("sv", "Swedish"),
    LanguageOption::new("ty", "Tahitian"),
    LanguageOption::new("ta", "Tamil"),
    LanguageOption::new("te", "Telugu"),
    LanguageOption::new("th", "Thai"),
    LanguageOption::new("ti", "Tigrinya"),
    LanguageOption::new("to", "Tongan"),
    LanguageOption::new("tr", "Turkish"),
    LanguageOption::new("uk", "Ukrainian"),
    LanguageOption::new("ur", "Urdu"),
    LanguageOption::new("vi", "Vietnamese"),
    LanguageOption::new("cy", "Welsh"),
    LanguageOption::new("yua", "Yucatec Maya"),
];

/// All languages offered by the language picker, sorted by display name
pub fn supported_languages() -> &'static [LanguageOption] {
    LANGUAGES
}

/// Look up a catalog entry by its exact code
pub fn find_language(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|language| language.code == code)
}
