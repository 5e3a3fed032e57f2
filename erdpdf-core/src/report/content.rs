use serde::{Deserialize, Serialize};

/// Text of the documentation report, separate from its layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContent {
    pub cover: CoverContent,
    pub descriptions_heading: String,
    pub entities: Vec<EntityDescription>,
    pub specifications_heading: String,
    pub specifications: Vec<Specification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverContent {
    pub title: String,
    pub subtitle: String,
    /// Two short lines under the subtitle
    #[serde(default)]
    pub taglines: Vec<String>,
    /// Lines near the bottom of the cover
    #[serde(default)]
    pub closing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

impl ReportContent {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The GlamCart documentation text.
    pub fn glamcart() -> Self {
        let entities = [
            ("USER", "Stores customer and admin account information with authentication details, skin profile for AI recommendations."),
            ("PRODUCT", "Contains makeup product catalog with ratings, pricing, color codes for virtual try-on, and inventory management."),
            ("REVIEW", "Customer reviews and ratings for products, linked to verified purchases for authenticity."),
            ("ORDER", "Transaction records with order items, pricing calculations, and shipping details (simulation mode)."),
            ("CART", "Temporary storage for products users intend to purchase, with quantity management."),
            ("ANALYTICS_EVENT", "Tracks user interactions, page views, clicks for Microsoft Clarity integration and custom analytics."),
            ("CHATBOT_CONVERSATION", "Stores AI chatbot conversation history, skin analysis results, and personalized recommendations."),
            ("AI_RECOMMENDATION", "AI-generated product suggestions based on user skin tone, type, and preferences with feedback tracking."),
            ("WISHLIST", "User-saved favorite products for future reference and purchase consideration."),
        ];
        let specifications = [
            ("Database Platform", "MongoDB Atlas (Free Tier M0)"),
            ("Storage Capacity", "512 MB"),
            ("Expected Data Volume", "~150 MB (5000 users, 1000 products)"),
            ("Normalization Level", "Third Normal Form (3NF)"),
            ("Primary Keys", "ObjectId (MongoDB auto-generated)"),
            ("Indexing Strategy", "email, brand, category, rating, timestamp"),
            ("Backup Strategy", "Automated daily snapshots (Atlas feature)"),
            ("Relationship Model", "Document-embedded + References"),
            ("Security", "Hashed passwords (bcrypt), JWT authentication"),
            ("Scalability", "Horizontal scaling ready (sharding support)"),
        ];

        Self {
            cover: CoverContent {
                title: "GlamCart".to_string(),
                subtitle: "Entity Relationship Diagram".to_string(),
                taglines: vec![
                    "Master's Level Web Technologies Project".to_string(),
                    "AI-Powered Virtual Makeup Try-On Platform".to_string(),
                ],
                closing: vec![
                    "Complete System Design Documentation".to_string(),
                    "IEEE 830 Standard Compliant".to_string(),
                ],
            },
            descriptions_heading: "Entity Descriptions".to_string(),
            entities: entities
                .into_iter()
                .map(|(name, description)| EntityDescription {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            specifications_heading: "Technical Specifications".to_string(),
            specifications: specifications
                .into_iter()
                .map(|(key, value)| Specification {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}
