//! The built-in GlamCart e-commerce database diagram.

use super::model::{
    Anchor, Attribute, Caption, Diagram, Entity, Panel, Relationship, TextLine, TextSize,
};
use crate::graphics::Color;

pub const CANVAS_WIDTH: u32 = 1400;
pub const CANVAS_HEIGHT: u32 = 2000;

const SLATE_900: Color = Color::Rgb(30.0 / 255.0, 41.0 / 255.0, 59.0 / 255.0);
const SLATE_600: Color = Color::Rgb(71.0 / 255.0, 85.0 / 255.0, 105.0 / 255.0);
const SLATE_500: Color = Color::Rgb(100.0 / 255.0, 116.0 / 255.0, 139.0 / 255.0);
const SLATE_400: Color = Color::Rgb(148.0 / 255.0, 163.0 / 255.0, 184.0 / 255.0);
const RED_600: Color = Color::Rgb(220.0 / 255.0, 38.0 / 255.0, 38.0 / 255.0);

/// Builds the GlamCart ERD: nine collections, eight relationships, a
/// legend and a statistics panel on a 1400x2000 canvas.
pub fn diagram() -> Diagram {
    Diagram {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        background: Color::rgb8(0xff, 0xff, 0xff),
        title: vec![
            caption("GlamCart - Entity Relationship Diagram (ERD)", 50, SLATE_900, TextSize::Title, true),
            caption("Master's Level Web Technologies Project", 80, SLATE_500, TextSize::Large, false),
            caption("AI-Powered Virtual Makeup Try-On Platform", 105, SLATE_500, TextSize::Large, false),
        ],
        entities: entities(),
        relationships: vec![
            relationship((225, 430), (225, 550), "places", "1:N"),
            relationship((400, 280), (550, 280), "writes", "1:N"),
            relationship((725, 280), (725, 550), "has", "1:1"),
            relationship((930, 250), (1050, 250), "receives", "1:N"),
            relationship((225, 830), (225, 950), "chats with", "1:N"),
            relationship((400, 350), (550, 1050), "gets rec", "1:N"),
            relationship((930, 350), (1050, 1050), "based on", "1:N"),
            relationship((225, 430), (1000, 620), "generates", "1:N"),
        ],
        panels: vec![legend(), statistics()],
        captions: vec![
            caption("Generated for GlamCart - Master's Web Technologies Final Project", 1520, SLATE_400, TextSize::Small, false),
            caption("Database: MongoDB Atlas (Free Tier) | Total Collections: 9", 1540, SLATE_400, TextSize::Small, false),
            caption("ERD follows Third Normal Form (3NF) - No data redundancy", 1560, SLATE_400, TextSize::Small, false),
        ],
    }
}

fn entities() -> Vec<Entity> {
    use Attribute as A;

    vec![
        entity("USER", (50, 150), (350, 280), true, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::plain("email: String (unique, indexed)"),
            A::plain("password: String (hashed bcrypt)"),
            A::plain("name: String"),
            A::plain("phone: String"),
            A::plain("role: Enum [user, admin]"),
            A::plain("profileImage: String (URL)"),
            A::plain("skinTone: String"),
            A::plain("skinType: String"),
            A::plain("createdAt: Date"),
            A::plain("lastLogin: Date"),
            A::plain("isActive: Boolean"),
        ]),
        entity("PRODUCT", (550, 150), (380, 330), true, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::plain("name: String"),
            A::plain("brand: String (indexed)"),
            A::plain("category: Enum [lipstick, eyeshadow]"),
            A::plain("price: Number"),
            A::plain("description: Text"),
            A::plain("colorCode: String (HEX)"),
            A::plain("colorFamily: String"),
            A::plain("imageUrl: String"),
            A::plain("averageRating: Number (indexed)"),
            A::plain("reviewCount: Number"),
            A::plain("stockQuantity: Number"),
            A::plain("isActive: Boolean"),
            A::foreign_key("createdBy: ObjectId (FK -> USER)"),
            A::plain("createdAt: Date"),
            A::plain("updatedAt: Date"),
        ]),
        entity("REVIEW", (1050, 150), (320, 220), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::foreign_key("productId: ObjectId (FK)"),
            A::foreign_key("userId: ObjectId (FK)"),
            A::plain("rating: Number (1-5)"),
            A::plain("comment: Text"),
            A::plain("isVerifiedPurchase: Boolean"),
            A::plain("helpfulCount: Number"),
            A::plain("createdAt: Date"),
        ]),
        entity("ORDER", (50, 550), (380, 280), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::foreign_key("userId: ObjectId (FK -> USER)"),
            A::plain("orderNumber: String (unique)"),
            A::plain("items: Array [{"),
            A::plain("  productId: ObjectId (FK)"),
            A::plain("  quantity: Number"),
            A::plain("  price: Number"),
            A::plain("}]"),
            A::plain("subtotal: Number"),
            A::plain("tax: Number"),
            A::plain("total: Number"),
            A::plain("shippingAddress: Object"),
            A::plain("status: Enum [placed, confirmed]"),
            A::plain("createdAt: Date"),
        ]),
        entity("CART", (550, 550), (350, 220), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::foreign_key("userId: ObjectId (FK -> USER, unique)"),
            A::plain("items: Array [{"),
            A::plain("  productId: ObjectId (FK)"),
            A::plain("  quantity: Number"),
            A::plain("  addedAt: Date"),
            A::plain("}]"),
            A::plain("updatedAt: Date"),
        ]),
        entity("ANALYTICS_EVENT", (1000, 550), (370, 200), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::plain("eventType: String (indexed)"),
            A::foreign_key("userId: ObjectId (FK, nullable)"),
            A::plain("sessionId: String (indexed)"),
            A::plain("metadata: Object"),
            A::plain("timestamp: Date (indexed)"),
        ]),
        entity("CHATBOT_CONVERSATION", (50, 950), (400, 240), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::foreign_key("userId: ObjectId (FK -> USER)"),
            A::plain("sessionId: String"),
            A::plain("messages: Array [{"),
            A::plain("  role: Enum [user, assistant]"),
            A::plain("  content: Text"),
            A::plain("  timestamp: Date"),
            A::plain("}]"),
            A::plain("skinAnalysis: Object"),
            A::plain("recommendations: Array"),
            A::plain("createdAt: Date"),
        ]),
        entity("AI_RECOMMENDATION", (550, 950), (380, 260), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::foreign_key("userId: ObjectId (FK -> USER)"),
            A::foreign_key("productId: ObjectId (FK -> PRODUCT)"),
            A::plain("skinTone: String"),
            A::plain("skinType: String"),
            A::plain("recommendationScore: Number"),
            A::plain("reason: Text"),
            A::plain("chatbotSessionId: String"),
            A::plain("wasHelpful: Boolean"),
            A::plain("userFeedback: Text"),
            A::plain("createdAt: Date"),
        ]),
        entity("WISHLIST", (1000, 950), (350, 200), false, vec![
            A::primary_key("_id: ObjectId (PK)"),
            A::foreign_key("userId: ObjectId (FK -> USER)"),
            A::plain("items: Array [{"),
            A::plain("  productId: ObjectId (FK)"),
            A::plain("  addedAt: Date"),
            A::plain("}]"),
            A::plain("updatedAt: Date"),
        ]),
    ]
}

fn legend() -> Panel {
    let mut lines = vec![line("LEGEND & KEY RELATIONSHIPS", (70, 1335), SLATE_900, TextSize::Large, true)];
    let keys = [
        "PK - Primary Key - Unique identifier for each record",
        "FK - Foreign Key - References another entity's primary key",
        "1:N - One-to-Many relationship (e.g., One USER writes Many REVIEWS)",
        "1:1 - One-to-One relationship (e.g., One USER has One CART)",
        "N:M - Many-to-Many relationship (handled via array references)",
    ];
    for (i, text) in keys.into_iter().enumerate() {
        lines.push(line(text, (70, 1365 + i as i32 * 25), SLATE_600, TextSize::Normal, false));
    }

    lines.push(line("NEW FEATURES:", (750, 1365), RED_600, TextSize::Normal, true));
    let features = [
        "AI Chatbot for personalized makeup recommendations",
        "AI-driven product suggestions based on skin analysis",
        "Wishlist feature for saving favorite products",
    ];
    for (i, text) in features.into_iter().enumerate() {
        lines.push(line(text, (750, 1390 + i as i32 * 25), SLATE_600, TextSize::Normal, false));
    }

    Panel {
        x: 50,
        y: 1300,
        width: 1320,
        height: 180,
        fill: Color::rgb8(0xf1, 0xf5, 0xf9),
        border: Color::rgb8(0xcb, 0xd5, 0xe1),
        lines,
    }
}

fn statistics() -> Panel {
    let mut lines = vec![line(
        "DATABASE STATISTICS & INDEXES",
        (70, 1630),
        Color::rgb8(0x1e, 0x40, 0xaf),
        TextSize::Large,
        true,
    )];
    let stats = [
        "- Total Entities: 9 (USER, PRODUCT, REVIEW, ORDER, CART, ANALYTICS_EVENT, CHATBOT_CONVERSATION, AI_RECOMMENDATION, WISHLIST)",
        "- Indexed Fields: email, brand, category, rating, eventType, sessionId, timestamp",
        "- Estimated Storage (1000 products, 5000 users): ~150MB (within MongoDB Atlas Free Tier 512MB)",
        "- Relationships: 8 foreign key references ensuring referential integrity",
    ];
    for (i, text) in stats.into_iter().enumerate() {
        lines.push(line(text, (70, 1655 + i as i32 * 22), SLATE_900, TextSize::Small, false));
    }

    Panel {
        x: 50,
        y: 1600,
        width: 1320,
        height: 120,
        fill: Color::rgb8(0xef, 0xf6, 0xff),
        border: Color::rgb8(0x3b, 0x82, 0xf6),
        lines,
    }
}

fn entity(
    name: &str,
    (x, y): (i32, i32),
    (width, height): (u32, u32),
    primary: bool,
    attributes: Vec<Attribute>,
) -> Entity {
    Entity {
        name: name.to_string(),
        x,
        y,
        width,
        height,
        primary,
        attributes,
    }
}

fn relationship(from: (i32, i32), to: (i32, i32), label: &str, cardinality: &str) -> Relationship {
    Relationship {
        from: Anchor::new(from.0, from.1),
        to: Anchor::new(to.0, to.1),
        label: label.to_string(),
        cardinality: cardinality.to_string(),
    }
}

fn caption(text: &str, y: i32, color: Color, size: TextSize, bold: bool) -> Caption {
    Caption {
        text: text.to_string(),
        y,
        color,
        size,
        bold,
    }
}

fn line(text: &str, (x, y): (i32, i32), color: Color, size: TextSize, bold: bool) -> TextLine {
    TextLine {
        text: text.to_string(),
        x,
        y,
        color,
        size,
        bold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erd::model::AttributeKind;

    #[test]
    fn test_nine_entities_eight_relationships() {
        let diagram = diagram();
        assert_eq!(diagram.entities.len(), 9);
        assert_eq!(diagram.relationships.len(), 8);

        let primary: Vec<&str> = diagram
            .entities
            .iter()
            .filter(|e| e.primary)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(primary, vec!["USER", "PRODUCT"]);
    }

    #[test]
    fn test_every_entity_starts_with_primary_key() {
        for entity in diagram().entities {
            assert_eq!(entity.attributes[0].kind, AttributeKind::PrimaryKey, "{}", entity.name);
        }
    }

    #[test]
    fn test_entities_fit_canvas() {
        let diagram = diagram();
        for e in &diagram.entities {
            assert!(e.x >= 0 && e.y >= 0);
            assert!(e.x as u32 + e.width <= diagram.width, "{}", e.name);
            assert!(e.y as u32 + e.height <= diagram.height, "{}", e.name);
        }
    }

    #[test]
    fn test_text_is_ascii() {
        let diagram = diagram();
        let texts = diagram
            .entities
            .iter()
            .flat_map(|e| e.attributes.iter().map(|a| a.text.as_str()))
            .chain(diagram.panels.iter().flat_map(|p| p.lines.iter().map(|l| l.text.as_str())))
            .chain(diagram.captions.iter().map(|c| c.text.as_str()));
        for text in texts {
            assert!(text.is_ascii(), "{text}");
        }
    }

    #[test]
    fn test_json_round_trip_preserves_diagram() {
        let original = diagram();
        let parsed = Diagram::from_json(&original.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed.entities, original.entities);
        assert_eq!(parsed.relationships, original.relationships);
        assert_eq!(parsed.width, original.width);
    }
}
