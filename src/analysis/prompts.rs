use serde_json::{Value, json};

use crate::model::StructuredRequest;

pub const POST_SENTIMENT_LABELS: [&str; 3] = ["Positive", "Negative", "Neutral"];

pub fn brand_request(brand: &str) -> StructuredRequest {
    StructuredRequest::new(
        format!(
            "Analyze the social media sentiment around the brand \"{brand}\". \
             Return the sentiment breakdown as positive, negative and neutral percentages, \
             a word cloud of frequently used terms with importance scores, \
             the top positive and negative themes, and 5 sample posts drawn from \
             several platforms (Twitter, YouTube, Instagram)."
        ),
        brand_schema(),
    )
}

pub fn youtube_request(video: &str) -> StructuredRequest {
    StructuredRequest::new(
        format!(
            "Analyze the comment section of the YouTube video at {video} \
             (assume the video exists). Return a sentiment breakdown, the trending topics \
             in the comments, the most common questions viewers ask, and 3 new, creative \
             content ideas based on that feedback."
        ),
        youtube_schema(),
    )
}

pub fn competitor_request(brand: &str, competitor: &str) -> StructuredRequest {
    StructuredRequest::new(
        format!(
            "Compare the social media presence of two brands: \"{brand}\" and \"{competitor}\". \
             List \"{brand}\" first and \"{competitor}\" second in the comparison. \
             Compare engagement rate (%), posting frequency (posts per week) and positive \
             sentiment (%), and give one top-performing post for each brand."
        ),
        competitor_schema(),
    )
}

fn sentiment_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "positive": {"type": "NUMBER", "description": "Positive sentiment percentage, e.g. 65"},
            "negative": {"type": "NUMBER", "description": "Negative sentiment percentage, e.g. 25"},
            "neutral": {"type": "NUMBER", "description": "Neutral sentiment percentage, e.g. 10"}
        },
        "required": ["positive", "negative", "neutral"]
    })
}

fn post_schema(constrain_sentiment: bool) -> Value {
    let sentiment = if constrain_sentiment {
        json!({"type": "STRING", "enum": POST_SENTIMENT_LABELS})
    } else {
        json!({"type": "STRING"})
    };

    let mut schema = json!({
        "type": "OBJECT",
        "properties": {
            "platform": {"type": "STRING", "description": "e.g. 'Twitter', 'YouTube'"},
            "username": {"type": "STRING", "description": "e.g. '@user123'"},
            "content": {"type": "STRING"},
            "sentiment": sentiment
        }
    });
    if constrain_sentiment {
        schema["required"] = json!(["platform", "username", "content", "sentiment"]);
    }
    schema
}

fn string_list_schema(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": {"type": "STRING"},
        "description": description
    })
}

pub fn brand_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": sentiment_schema(),
            "wordCloud": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": {"type": "STRING", "description": "A word or phrase"},
                        "value": {"type": "NUMBER", "description": "Frequency or importance score, e.g. 88"}
                    },
                    "required": ["text", "value"]
                }
            },
            "topThemes": {
                "type": "OBJECT",
                "properties": {
                    "positive": string_list_schema("Top 3-5 positive themes"),
                    "negative": string_list_schema("Top 3-5 negative themes")
                },
                "required": ["positive", "negative"]
            },
            "samplePosts": {
                "type": "ARRAY",
                "items": post_schema(true)
            }
        },
        "required": ["sentiment", "wordCloud", "topThemes", "samplePosts"]
    })
}

pub fn youtube_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": sentiment_schema(),
            "trendingTopics": string_list_schema("Top 3-5 topics discussed in the comments"),
            "commonQuestions": string_list_schema("Most frequently asked questions"),
            "contentIdeas": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING", "description": "A catchy video title"},
                        "description": {"type": "STRING", "description": "A short pitch for the video"}
                    },
                    "required": ["title", "description"]
                }
            }
        },
        "required": ["sentiment", "trendingTopics", "commonQuestions", "contentIdeas"]
    })
}

pub fn competitor_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "comparison": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING", "description": "Brand name"},
                        "engagementRate": {"type": "NUMBER", "description": "e.g. 3.5"},
                        "postingFrequency": {"type": "NUMBER", "description": "e.g. 5"},
                        "positiveSentiment": {"type": "NUMBER", "description": "e.g. 75"}
                    },
                    "required": ["name", "engagementRate", "postingFrequency", "positiveSentiment"]
                }
            },
            "topPosts": {
                "type": "OBJECT",
                "properties": {
                    "brand": {"type": "ARRAY", "items": post_schema(false)},
                    "competitor": {"type": "ARRAY", "items": post_schema(false)}
                },
                "required": ["brand", "competitor"]
            }
        },
        "required": ["comparison", "topPosts"]
    })
}
