//! Translation catalogs for the interface languages.
//!
//! Lookups fall back to English and then to the key itself, so a missing
//! translation never breaks a page. Placeholders use `{name}` syntax.

use std::collections::HashMap;
use std::sync::OnceLock;

use agrow_core::Language;

// =============================================================================
// Catalogs
// =============================================================================

const CATALOG_EN: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Home"),
    ("nav.dashboard", "Dashboard"),
    ("nav.cropPrices", "Crop Prices"),
    ("nav.disease", "Disease Detection"),
    ("nav.chatbot", "Farm Assistant"),
    ("nav.settings", "Settings"),
    ("nav.login", "Sign In"),
    ("nav.logout", "Sign Out"),
    ("nav.language", "Language"),
    ("nav.change", "Change"),
    // Landing
    ("landing.hero.titlePart1", "Smart Farming for"),
    ("landing.hero.titlePart2", "Maharashtra"),
    (
        "landing.hero.subtitle",
        "AI-powered insights for crop selection, disease diagnosis, and yield optimization based on real-time weather, soil health, and climate data.",
    ),
    ("landing.hero.getStartedButton", "Get Started"),
    ("landing.hero.learnMoreButton", "Learn More"),
    ("landing.features.title", "Why Choose Agrow AI?"),
    (
        "landing.features.subtitle",
        "Comprehensive AI-powered farming solutions designed specifically for Maharashtra's diverse agricultural landscape.",
    ),
    ("landing.features.weather.title", "Weather Intelligence"),
    (
        "landing.features.weather.desc",
        "7-day forecasts with monsoon predictions and climate insights",
    ),
    ("landing.features.cropRec.title", "Crop Recommendations"),
    (
        "landing.features.cropRec.desc",
        "AI-powered suggestions for optimal crop selection based on your region",
    ),
    ("landing.features.diseaseDet.title", "Disease Detection"),
    (
        "landing.features.diseaseDet.desc",
        "Early identification of crop diseases with treatment recommendations",
    ),
    ("landing.features.marketPrices.title", "Current Market Prices"),
    (
        "landing.features.marketPrices.desc",
        "Latest mandi prices for your crops across districts to make smarter selling decisions.",
    ),
    ("landing.features.mobileFriendly.title", "Mobile Friendly"),
    (
        "landing.features.mobileFriendly.desc",
        "Access insights anywhere, even with limited internet connectivity",
    ),
    ("landing.features.localLang.title", "Local Language Support"),
    (
        "landing.features.localLang.desc",
        "Available in Marathi, Hindi, and English for better accessibility",
    ),
    ("landing.footer.copyright", "© {year} Agrow AI. All rights reserved."),
    (
        "landing.footer.moto",
        "Empowering Maharashtra farmers with AI-powered solutions",
    ),
    // Auth
    ("auth.login.title", "Welcome Back"),
    ("auth.login.subtitle", "Sign in to access your farm dashboard"),
    ("auth.login.button", "Sign In"),
    ("auth.login.switchText", "Don't have an account?"),
    ("auth.login.link", "Sign Up"),
    ("auth.register.title", "Join AgrowAI"),
    ("auth.register.subtitle", "Create your account to get started"),
    ("auth.register.button", "Create Account"),
    ("auth.register.switchText", "Already have an account?"),
    ("auth.register.link", "Sign In"),
    ("auth.fields.username", "Username"),
    ("auth.fields.email", "Email"),
    ("auth.fields.password", "Password"),
    ("auth.fields.confirmPassword", "Confirm Password"),
    ("auth.fields.phone", "Phone Number"),
    ("auth.fields.state", "State"),
    ("auth.fields.city", "City"),
    ("auth.fields.crops", "Crop Preferences"),
    ("auth.placeholders.state", "Select your state"),
    ("auth.placeholders.city", "Select your city"),
    ("auth.placeholders.selectStateFirst", "Select state first"),
    ("auth.loadCities", "Load cities"),
    ("auth.error.usernameRequired", "Username is required"),
    ("auth.error.passwordRequired", "Password is required"),
    ("auth.error.emailRequired", "Email is required"),
    ("auth.error.emailInvalid", "Email is invalid"),
    (
        "auth.error.passwordTooShort",
        "Password must be at least 6 characters",
    ),
    ("auth.error.confirmRequired", "Confirm password is required"),
    ("auth.error.passwordMismatch", "Passwords do not match"),
    ("auth.error.phoneRequired", "Phone number is required"),
    ("auth.error.phoneInvalid", "Phone number is invalid"),
    ("auth.error.stateRequired", "State is required"),
    ("auth.error.cityRequired", "City is required"),
    ("auth.info.title", "Why Join AgrowAI?"),
    ("auth.info.personalized.title", "Personalized Insights"),
    (
        "auth.info.personalized.desc",
        "Get customized farming advice based on your location and crop preferences.",
    ),
    ("auth.info.localized.title", "Local Weather Data"),
    (
        "auth.info.localized.desc",
        "Access real-time weather information for your specific region.",
    ),
    ("auth.info.regional.title", "Regional Crop Prices"),
    (
        "auth.info.regional.desc",
        "Stay updated with market prices in your local area.",
    ),
    (
        "auth.info.note",
        "Your information is secure and will only be used to provide better farming insights.",
    ),
    // Onboarding
    ("flow.register", "Register"),
    ("flow.selectRegion", "Select Region"),
    ("flow.selectCrops", "Select Crops"),
    ("flow.dashboard", "Dashboard"),
    ("region.title", "Select Your Region"),
    (
        "region.subtitle",
        "Choose your state and district for localized weather and crop advice",
    ),
    ("region.state", "State"),
    ("region.district", "District"),
    ("region.selectState", "Select a state"),
    ("region.selectDistrict", "Select a district"),
    ("region.loadDistricts", "Show districts"),
    ("region.continue", "Continue"),
    ("region.error.districtRequired", "Please select a district"),
    ("crops.title", "Select Your Crops"),
    (
        "crops.subtitle",
        "Pick the crops you grow or plan to grow this season",
    ),
    ("crops.continue", "Continue to Dashboard"),
    ("crops.back", "Back"),
    ("crops.error.required", "Please select at least one crop"),
    // Dashboard
    ("dashboard.welcome", "Welcome, {name}"),
    ("dashboard.region", "Showing insights for {district}"),
    ("dashboard.noRegion", "No district selected yet"),
    ("dashboard.changeRegion", "Change region"),
    ("dashboard.yourCrops", "Your Crops"),
    ("dashboard.noCrops", "No crops selected yet"),
    ("dashboard.weather.title", "7-Day Weather Forecast"),
    ("dashboard.weather.humidity", "Humidity"),
    ("dashboard.weather.wind", "Wind"),
    ("dashboard.weather.rain", "Rain"),
    ("dashboard.market.title", "Today's Mandi Prices"),
    ("dashboard.market.viewAll", "View all prices"),
    ("dashboard.recommendations.title", "Crop Recommendations"),
    ("dashboard.recommendations.suitability", "Suitability"),
    ("dashboard.recommendations.risk", "Risk"),
    ("dashboard.alerts.title", "Disease Alerts"),
    ("dashboard.yield.title", "Expected Yield"),
    ("dashboard.yield.perAcre", "per acre"),
    ("dashboard.monsoon.title", "Monsoon Outlook"),
    ("dashboard.monsoon.rainfall", "Expected rainfall"),
    ("dashboard.monsoon.soilMoisture", "Soil moisture"),
    // Shared panel states
    ("panel.empty", "No data available right now."),
    ("panel.retry", "Try again"),
    (
        "error.notConfigured",
        "This service is not configured on the server.",
    ),
    ("error.unreachable", "Could not reach the data provider."),
    (
        "error.badResponse",
        "The data provider returned an unexpected response.",
    ),
    // Crop prices
    ("prices.title", "Mandi Prices"),
    (
        "prices.subtitle",
        "Latest commodity prices reported by AGMARKNET",
    ),
    ("prices.errorTitle", "Unable to load market prices"),
    ("prices.filter.state", "State"),
    ("prices.filter.district", "District"),
    ("prices.filter.market", "Market"),
    ("prices.filter.commodity", "Commodity"),
    ("prices.filter.all", "All"),
    ("prices.filter.commodityPlaceholder", "Search commodity"),
    ("prices.apply", "Apply filters"),
    ("prices.reset", "Reset"),
    ("prices.stats.records", "Records"),
    ("prices.stats.states", "States"),
    ("prices.stats.commodities", "Commodities"),
    ("prices.stats.avgModal", "Avg. modal price"),
    ("prices.table.market", "Market"),
    ("prices.table.commodity", "Commodity"),
    ("prices.table.variety", "Variety"),
    ("prices.table.grade", "Grade"),
    ("prices.table.date", "Arrival date"),
    ("prices.table.min", "Min"),
    ("prices.table.max", "Max"),
    ("prices.table.modal", "Modal"),
    ("prices.perQuintal", "Prices in ₹ per quintal"),
    ("prices.noMatch", "No records match the selected filters."),
    // Disease detection
    ("disease.title", "Crop Disease Detection"),
    (
        "disease.subtitle",
        "Upload a clear photo of an affected leaf to identify the disease",
    ),
    ("disease.upload", "Leaf photo"),
    ("disease.analyze", "Analyze"),
    ("disease.result", "Analysis Result"),
    ("disease.disease", "Disease"),
    ("disease.confidence", "Confidence"),
    ("disease.treatment", "Recommended treatment"),
    ("disease.history", "Recent detections"),
    ("disease.noHistory", "No detections yet."),
    ("disease.error.empty", "Empty file"),
    ("disease.error.notImage", "Please upload an image file"),
    ("disease.error.tooLarge", "The image must be 10 MB or smaller"),
    // Chatbot
    ("chat.title", "Farm Assistant"),
    (
        "chat.subtitle",
        "Ask about weather, prices, diseases, soil or irrigation",
    ),
    ("chat.placeholder", "Type your question..."),
    ("chat.send", "Send"),
    ("chat.clear", "Clear chat"),
    ("chat.suggestions", "Quick questions"),
    ("chat.empty", "Start the conversation with a question below."),
    ("chat.you", "You"),
    ("chat.assistant", "Assistant"),
    // Settings
    ("settings.title", "Settings"),
    ("settings.profile", "Profile"),
    ("settings.language", "Language"),
    ("settings.appearance", "Appearance"),
    ("settings.darkMode", "Dark mode"),
    ("settings.notifications", "Notifications"),
    ("settings.notify.weather", "Weather alerts"),
    ("settings.notify.disease", "Disease alerts"),
    ("settings.notify.crop", "Crop recommendations"),
    ("settings.notify.price", "Price updates"),
    ("settings.farm", "Farm"),
    ("settings.district", "District"),
    ("settings.crops", "Crops"),
    ("settings.save", "Save settings"),
    ("settings.saved", "Settings saved."),
    // Not found
    ("notFound.title", "Page not found"),
    (
        "notFound.body",
        "The page you are looking for does not exist.",
    ),
    ("notFound.home", "Back to home"),
];

const CATALOG_MR: &[(&str, &str)] = &[
    ("nav.home", "मुख्यपृष्ठ"),
    ("nav.dashboard", "डॅशबोर्ड"),
    ("nav.cropPrices", "पिकांचे भाव"),
    ("nav.disease", "रोग ओळख"),
    ("nav.chatbot", "शेती सहाय्यक"),
    ("nav.settings", "सेटिंग्ज"),
    ("nav.login", "साइन इन"),
    ("nav.logout", "साइन आउट"),
    ("nav.language", "भाषा"),
    ("landing.hero.titlePart1", "स्मार्ट शेती"),
    ("landing.hero.titlePart2", "महाराष्ट्रासाठी"),
    (
        "landing.hero.subtitle",
        "वास्तविक वेळेतील हवामान, मातीचे आरोग्य आणि हवामान डेटावर आधारित पीक निवड, रोग निदान आणि उत्पादन ऑप्टिमायझेशनसाठी AI-शक्तीवर चालणारी अंतर्दृष्टी.",
    ),
    ("landing.hero.getStartedButton", "सुरुवात करा"),
    ("landing.hero.learnMoreButton", "अधिक जाणून घ्या"),
    ("landing.features.title", "Agrow AI का निवडावे?"),
    ("landing.features.weather.title", "हवामान बुद्धिमत्ता"),
    (
        "landing.features.weather.desc",
        "मान्सून अंदाज आणि हवामान अंतर्दृष्टीसह 7-दिवसांचे अंदाज",
    ),
    ("landing.features.cropRec.title", "पीक शिफारसी"),
    ("landing.features.diseaseDet.title", "रोग ओळख"),
    (
        "landing.features.diseaseDet.desc",
        "उपचार शिफारसींसह पिकांच्या रोगांची लवकर ओळख",
    ),
    ("landing.features.marketPrices.title", "वर्तमान बाजार भाव"),
    ("landing.features.mobileFriendly.title", "मोबाइल अनुकूल"),
    ("landing.features.localLang.title", "स्थानिक भाषेचा आधार"),
    (
        "landing.features.localLang.desc",
        "उत्तम प्रवेशयोग्यतेसाठी मराठी, हिंदी आणि इंग्रजीमध्ये उपलब्ध",
    ),
    ("landing.footer.copyright", "© {year} Agrow AI. सर्व हक्क राखीव."),
    (
        "landing.footer.moto",
        "AI-शक्तीवर चालणाऱ्या उपायांनी महाराष्ट्रातील शेतकऱ्यांना सक्षम करत आहे",
    ),
    ("auth.login.title", "पुन्हा स्वागत"),
    (
        "auth.login.subtitle",
        "तुमच्या शेत डॅशबोर्डमध्ये प्रवेश करण्यासाठी साइन इन करा",
    ),
    ("auth.login.button", "साइन इन"),
    ("auth.login.switchText", "खाते नाही?"),
    ("auth.login.link", "साइन अप करा"),
    ("auth.register.title", "AgrowAI मध्ये सामील व्हा"),
    (
        "auth.register.subtitle",
        "सुरुवात करण्यासाठी तुमचे खाते तयार करा",
    ),
    ("auth.register.button", "खाते तयार करा"),
    ("auth.register.switchText", "आधीच खाते आहे?"),
    ("auth.register.link", "साइन इन करा"),
    ("auth.fields.state", "राज्य"),
    ("auth.placeholders.state", "तुमचे राज्य निवडा"),
    ("auth.placeholders.selectStateFirst", "प्रथम राज्य निवडा"),
    ("auth.error.passwordRequired", "पासवर्ड आवश्यक आहे"),
    ("auth.error.passwordTooShort", "पासवर्ड किमान 6 अक्षरे असावे"),
    ("auth.error.confirmRequired", "कृपया आपला पासवर्ड पुष्टी करा"),
    ("auth.error.passwordMismatch", "पासवर्ड जुळत नाहीत"),
    ("auth.error.stateRequired", "राज्य आवश्यक आहे"),
    ("auth.info.title", "AgrowAI मध्ये का सामील व्हावे?"),
    ("auth.info.personalized.title", "वैयक्तिकृत अंतर्दृष्टी"),
    ("auth.info.localized.title", "स्थानिक हवामान डेटा"),
    ("auth.info.regional.title", "प्रादेशिक पिकाच्या किमती"),
    ("flow.register", "नोंदणी"),
    ("flow.selectRegion", "प्रदेश निवडा"),
    ("flow.selectCrops", "पिके निवडा"),
    ("flow.dashboard", "डॅशबोर्ड"),
    ("region.district", "जिल्हा"),
    ("region.state", "राज्य"),
    ("dashboard.welcome", "स्वागत आहे, {name}"),
    ("settings.title", "सेटिंग्ज"),
    ("settings.language", "भाषा"),
];

const CATALOG_HI: &[(&str, &str)] = &[
    ("nav.home", "होम"),
    ("nav.dashboard", "डैशबोर्ड"),
    ("nav.cropPrices", "फसल मूल्य"),
    ("nav.disease", "रोग पहचान"),
    ("nav.chatbot", "कृषि सहायक"),
    ("nav.settings", "सेटिंग्स"),
    ("nav.login", "साइन इन"),
    ("nav.logout", "साइन आउट"),
    ("nav.language", "भाषा"),
    ("landing.hero.titlePart1", "स्मार्ट फार्मिंग"),
    ("landing.hero.titlePart2", "महाराष्ट्र के लिए"),
    (
        "landing.hero.subtitle",
        "वास्तविक समय के मौसम, मिट्टी के स्वास्थ्य और जलवायु डेटा के आधार पर फसल चयन, रोग निदान और उपज अनुकूलन के लिए AI-संचालित अंतर्दृष्टि।",
    ),
    ("landing.hero.getStartedButton", "शुरू करें"),
    ("landing.hero.learnMoreButton", "और जानें"),
    ("landing.features.title", "Agrow AI क्यों चुनें?"),
    ("landing.features.weather.title", "मौसम बुद्धिमत्ता"),
    (
        "landing.features.weather.desc",
        "मानसून पूर्वानुमान और जलवायु अंतर्दृष्टि के साथ 7-दिवसीय पूर्वानुमान",
    ),
    ("landing.features.cropRec.title", "फसल सिफारिशें"),
    ("landing.features.diseaseDet.title", "रोग का पता लगाना"),
    (
        "landing.features.diseaseDet.desc",
        "उपचार सिफारिशों के साथ फसल रोगों की शीघ्र पहचान",
    ),
    ("landing.features.marketPrices.title", "वर्तमान बाजार मूल्य"),
    ("landing.features.mobileFriendly.title", "मोबाइल अनुकूल"),
    ("landing.features.localLang.title", "स्थानीय भाषा समर्थन"),
    (
        "landing.features.localLang.desc",
        "बेहतर पहुंच के लिए मराठी, हिंदी और अंग्रेजी में उपलब्ध",
    ),
    ("landing.footer.copyright", "© {year} एग्रो एआई। सर्वाधिकार सुरक्षित।"),
    (
        "landing.footer.moto",
        "एआई-संचालित समाधानों के साथ महाराष्ट्र के किसानों को सशक्त बनाना",
    ),
    ("auth.login.title", "वापस स्वागत है"),
    (
        "auth.login.subtitle",
        "अपने फार्म डैशबोर्ड तक पहुंचने के लिए साइन इन करें",
    ),
    ("auth.login.button", "साइन इन"),
    ("auth.login.switchText", "खाता नहीं है?"),
    ("auth.login.link", "साइन अप करें"),
    ("auth.register.title", "AgrowAI में शामिल हों"),
    (
        "auth.register.subtitle",
        "शुरुआत करने के लिए अपना खाता बनाएं",
    ),
    ("auth.register.button", "खाता बनाएं"),
    ("auth.register.switchText", "पहले से खाता है?"),
    ("auth.register.link", "साइन इन करें"),
    ("auth.fields.state", "राज्य"),
    ("auth.placeholders.state", "अपना राज्य चुनें"),
    ("auth.placeholders.selectStateFirst", "पहले राज्य चुनें"),
    ("auth.error.passwordRequired", "पासवर्ड आवश्यक है"),
    (
        "auth.error.passwordTooShort",
        "पासवर्ड कम से कम 6 अक्षर का होना चाहिए",
    ),
    ("auth.error.confirmRequired", "कृपया अपना पासवर्ड पुष्टि करें"),
    ("auth.error.passwordMismatch", "पासवर्ड मेल नहीं खाते"),
    ("auth.error.stateRequired", "राज्य आवश्यक है"),
    ("auth.info.title", "AgrowAI में क्यों शामिल हों?"),
    ("auth.info.personalized.title", "व्यक्तिगत अंतर्दृष्टि"),
    ("auth.info.localized.title", "स्थानीय मौसम डेटा"),
    ("auth.info.regional.title", "क्षेत्रीय फसल कीमतें"),
    ("flow.register", "पंजीकरण"),
    ("flow.selectRegion", "क्षेत्र चुनें"),
    ("flow.selectCrops", "फसलें चुनें"),
    ("flow.dashboard", "डैशबोर्ड"),
    ("region.district", "जिला"),
    ("region.state", "राज्य"),
    ("dashboard.welcome", "स्वागत है, {name}"),
    ("settings.title", "सेटिंग्स"),
    ("settings.language", "भाषा"),
];

/// Returns the message catalog for `language`.
fn catalog_for(language: Language) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_MR_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_HI_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match language {
        Language::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Language::Mr => CATALOG_MR_MAP.get_or_init(|| CATALOG_MR.iter().copied().collect()),
        Language::Hi => CATALOG_HI_MAP.get_or_init(|| CATALOG_HI.iter().copied().collect()),
    }
}

// =============================================================================
// Translation
// =============================================================================

/// Translate `key`, falling back to English and then to the key itself.
#[must_use]
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    catalog_for(language)
        .get(key)
        .or_else(|| catalog_for(Language::En).get(key))
        .copied()
        .unwrap_or(key)
}

/// Translate `key` and substitute every `{name}` placeholder from `args`.
#[must_use]
pub fn translate_with(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = translate(language, key).to_string();
    for (name, value) in args {
        result = result.replace(&format!("{{{name}}}"), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_selected_language() {
        assert_eq!(translate(Language::Mr, "nav.home"), "मुख्यपृष्ठ");
        assert_eq!(translate(Language::Hi, "flow.dashboard"), "डैशबोर्ड");
    }

    #[test]
    fn test_translate_falls_back_to_english() {
        assert_eq!(
            translate(Language::Hi, "prices.noMatch"),
            "No records match the selected filters."
        );
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        assert_eq!(translate(Language::Mr, "missing.key"), "missing.key");
    }

    #[test]
    fn test_translate_with_replaces_placeholders() {
        assert_eq!(
            translate_with(Language::En, "landing.footer.copyright", &[("year", "2025")]),
            "© 2025 Agrow AI. All rights reserved."
        );
        assert_eq!(
            translate_with(Language::Mr, "dashboard.welcome", &[("name", "Ravi")]),
            "स्वागत आहे, Ravi"
        );
    }

    #[test]
    fn test_every_translated_key_exists_in_english() {
        let english = catalog_for(Language::En);
        for (key, _) in CATALOG_MR.iter().chain(CATALOG_HI) {
            assert!(english.contains_key(key), "{key} has no English entry");
        }
    }
}
