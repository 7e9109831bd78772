//! Scripted farming assistant.
//!
//! Replies come from an ordered rule table: the first rule with a keyword
//! in the message wins, otherwise the fallback answers.

/// One canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatReply {
    pub topic: &'static str,
    pub text: &'static str,
}

struct Rule {
    topic: &'static str,
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Quick prompts shown under an empty transcript.
pub const SUGGESTIONS: [&str; 5] = [
    "Best crops for current season",
    "Weather forecast for my area",
    "Disease prevention tips",
    "Soil preparation advice",
    "Check crop market price",
];

const RULES: &[Rule] = &[
    Rule {
        topic: "greeting",
        keywords: &["hi", "hello", "hey", "namaste", "namaskar"],
        reply: "Namaste! I am your Agrow farming assistant. Ask me about weather, \
                market prices, crop diseases, soil or irrigation.",
    },
    Rule {
        topic: "weather",
        keywords: &["weather", "forecast", "rain", "temperature", "monsoon", "climate"],
        reply: "The dashboard shows a 7-day forecast for your district. If rain is \
                likely, postpone spraying and fertilizer application, and check \
                field drainage before heavy showers.",
    },
    Rule {
        topic: "market",
        keywords: &["price", "market", "mandi", "sell", "rate"],
        reply: "Open Crop Prices to compare today's minimum, maximum and modal \
                prices across mandis. Filter by district and commodity to find \
                the best market before you sell.",
    },
    Rule {
        topic: "disease",
        keywords: &["disease", "pest", "blight", "fungus", "infection", "spots", "insect"],
        reply: "Upload a clear photo of the affected leaf on the Disease Detection \
                page. Meanwhile remove infected leaves, avoid overhead watering and \
                rotate crops to break the disease cycle.",
    },
    Rule {
        topic: "soil",
        keywords: &["soil", "fertilizer", "fertiliser", "compost", "manure", "npk"],
        reply: "Get a soil test every season. Add well-rotted compost or farmyard \
                manure before sowing and plough to a fine tilth; apply NPK based on \
                the soil test rather than by habit.",
    },
    Rule {
        topic: "crop",
        keywords: &["crop", "season", "sow", "plant", "grow", "kharif", "rabi"],
        reply: "For the Kharif season (June to October) consider rice, cotton, \
                soybean or maize. For Rabi (October to March) wheat, gram and onion \
                do well. Match the crop to your soil and water availability.",
    },
    Rule {
        topic: "irrigation",
        keywords: &["irrigation", "irrigate", "water", "drip", "sprinkler"],
        reply: "Drip irrigation saves up to half the water for vegetables and \
                orchards. Water early in the morning and check soil moisture a few \
                centimetres down before the next irrigation.",
    },
];

const FALLBACK: ChatReply = ChatReply {
    topic: "fallback",
    text: "I can help with weather, market prices, crop diseases, soil preparation, \
           crop choice and irrigation. Try one of the suggestions below.",
};

/// Whether `word` counts as a mention of `keyword`.
///
/// Short keywords must match the whole word; longer ones also match as a
/// prefix, so "crop" matches "crops".
fn mentions(word: &str, keyword: &str) -> bool {
    word == keyword || (keyword.len() > 3 && word.starts_with(keyword))
}

/// Reply to a user message. Blank input gets no reply.
#[must_use]
pub fn respond(input: &str) -> Option<ChatReply> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let reply = RULES
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| words.iter().any(|word| mentions(word, keyword)))
        })
        .map_or(FALLBACK, |rule| ChatReply {
            topic: rule.topic,
            text: rule.reply,
        });

    Some(reply)
}
