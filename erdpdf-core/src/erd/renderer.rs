use super::model::{
    AttributeKind, Caption, Diagram, Entity, Panel, Relationship, TextLine, TextSize,
};
use crate::error::{PdfError, Result};
use crate::graphics::Color;
use crate::raster::{Bitmap, Canvas};
use embedded_graphics::mono_font::{ascii, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Triangle,
};
use embedded_graphics::text::{Alignment, Text};

const HEADER_HEIGHT: u32 = 40;
const BORDER_WIDTH: u32 = 2;
const TITLE_INSET: (i32, i32) = (15, 26);
const FIRST_ATTRIBUTE_OFFSET: i32 = 65;
const ATTRIBUTE_SPACING: i32 = 22;
const SHADOW_OFFSET: i32 = 4;
const SHADOW_ALPHA: f64 = 0.1;
const DASH_LENGTH: f64 = 5.0;
const ARROW_LENGTH: f64 = 10.0;
const LABEL_BOX: Size = Size::new(80, 50);

/// Colours used for the parts of the diagram that the model does not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary_header: Color,
    pub primary_border: Color,
    pub secondary_header: Color,
    pub secondary_border: Color,
    pub body: Color,
    pub entity_title: Color,
    pub primary_key: Color,
    pub foreign_key: Color,
    pub plain_attribute: Color,
    pub connector: Color,
    pub label_border: Color,
    pub label_text: Color,
    pub cardinality_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_header: Color::rgb8(0x3b, 0x82, 0xf6),
            primary_border: Color::rgb8(0x25, 0x63, 0xeb),
            secondary_header: Color::rgb8(0x8b, 0x5c, 0xf6),
            secondary_border: Color::rgb8(0x7c, 0x3a, 0xed),
            body: Color::white(),
            entity_title: Color::white(),
            primary_key: Color::rgb8(0xdc, 0x26, 0x26),
            foreign_key: Color::rgb8(0x05, 0x96, 0x69),
            plain_attribute: Color::rgb8(0x47, 0x55, 0x69),
            connector: Color::rgb8(0x64, 0x74, 0x8b),
            label_border: Color::rgb8(0x94, 0xa3, 0xb8),
            label_text: Color::rgb8(0x1e, 0x29, 0x3b),
            cardinality_text: Color::rgb8(0x64, 0x74, 0x8b),
        }
    }
}

/// Draws a [`Diagram`] onto a fresh [`Canvas`].
///
/// Layers are painted in a fixed order: title, entities, relationships,
/// panels, captions. Later layers cover earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ErdRenderer {
    theme: Theme,
}

impl ErdRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Renders the diagram.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the canvas is empty or an entity box
    /// does not fit inside it.
    pub fn render(&self, diagram: &Diagram) -> Result<Bitmap> {
        for entity in &diagram.entities {
            check_entity_bounds(entity, diagram.width, diagram.height)?;
        }

        let mut canvas = Canvas::new(diagram.width, diagram.height, diagram.background)?;
        let center_x = diagram.width as i32 / 2;

        for caption in &diagram.title {
            draw_caption(&mut canvas, caption, center_x);
        }
        for entity in &diagram.entities {
            self.draw_entity(&mut canvas, entity, diagram.background);
        }
        for relationship in &diagram.relationships {
            self.draw_relationship(&mut canvas, relationship);
        }
        for panel in &diagram.panels {
            draw_panel(&mut canvas, panel);
        }
        for caption in &diagram.captions {
            draw_caption(&mut canvas, caption, center_x);
        }

        tracing::info!(
            width = diagram.width,
            height = diagram.height,
            entities = diagram.entities.len(),
            relationships = diagram.relationships.len(),
            "rendered diagram"
        );
        canvas.finish()
    }

    fn draw_entity(&self, canvas: &mut Canvas, entity: &Entity, background: Color) {
        let (header, border) = if entity.primary {
            (self.theme.primary_header, self.theme.primary_border)
        } else {
            (self.theme.secondary_header, self.theme.secondary_border)
        };
        let top_left = Point::new(entity.x, entity.y);
        let size = Size::new(entity.width, entity.height);

        let shadow = Color::black().over(background, SHADOW_ALPHA);
        paint(
            canvas,
            Rectangle::new(top_left + Point::new(SHADOW_OFFSET, SHADOW_OFFSET), size)
                .into_styled(PrimitiveStyle::with_fill(shadow.into())),
        );
        paint(
            canvas,
            Rectangle::new(top_left, Size::new(entity.width, HEADER_HEIGHT))
                .into_styled(PrimitiveStyle::with_fill(header.into())),
        );
        paint(
            canvas,
            Rectangle::new(
                top_left + Point::new(0, HEADER_HEIGHT as i32),
                Size::new(entity.width, entity.height - HEADER_HEIGHT),
            )
            .into_styled(PrimitiveStyle::with_fill(self.theme.body.into())),
        );

        let outline = PrimitiveStyleBuilder::new()
            .stroke_color(border.into())
            .stroke_width(BORDER_WIDTH)
            .build();
        paint(canvas, Rectangle::new(top_left, size).into_styled(outline));
        paint(
            canvas,
            Rectangle::new(top_left, Size::new(entity.width, HEADER_HEIGHT)).into_styled(outline),
        );

        paint(
            canvas,
            Text::new(
                &entity.name,
                top_left + Point::new(TITLE_INSET.0, TITLE_INSET.1),
                MonoTextStyle::new(&ascii::FONT_9X18_BOLD, self.theme.entity_title.into()),
            ),
        );

        for (i, attribute) in entity.attributes.iter().enumerate() {
            let (font, color) = match attribute.kind {
                AttributeKind::PrimaryKey => (&ascii::FONT_7X14_BOLD, self.theme.primary_key),
                AttributeKind::ForeignKey => (&ascii::FONT_7X14, self.theme.foreign_key),
                AttributeKind::Plain => (&ascii::FONT_7X14, self.theme.plain_attribute),
            };
            let y = FIRST_ATTRIBUTE_OFFSET + i as i32 * ATTRIBUTE_SPACING;
            paint(
                canvas,
                Text::new(
                    &attribute.text,
                    top_left + Point::new(TITLE_INSET.0, y),
                    MonoTextStyle::new(font, color.into()),
                ),
            );
        }
    }

    fn draw_relationship(&self, canvas: &mut Canvas, relationship: &Relationship) {
        let (x1, y1) = (relationship.from.x as f64, relationship.from.y as f64);
        let (x2, y2) = (relationship.to.x as f64, relationship.to.y as f64);
        let connector: Rgb888 = self.theme.connector.into();

        for (start, end) in dash_segments((x1, y1), (x2, y2), DASH_LENGTH) {
            paint(
                canvas,
                Line::new(to_point(start), to_point(end))
                    .into_styled(PrimitiveStyle::with_stroke(connector, BORDER_WIDTH)),
            );
        }

        let [tip, left, right] = arrowhead((x1, y1), (x2, y2), ARROW_LENGTH);
        paint(
            canvas,
            Triangle::new(to_point(tip), to_point(left), to_point(right))
                .into_styled(PrimitiveStyle::with_fill(connector)),
        );

        let mid = Point::new(
            ((x1 + x2) / 2.0).round() as i32,
            ((y1 + y2) / 2.0).round() as i32,
        );
        let label_style = PrimitiveStyleBuilder::new()
            .fill_color(Color::white().into())
            .stroke_color(self.theme.label_border.into())
            .stroke_width(1)
            .build();
        paint(
            canvas,
            Rectangle::new(mid - Point::new(40, 30), LABEL_BOX).into_styled(label_style),
        );
        paint(
            canvas,
            Text::with_alignment(
                &relationship.label,
                mid - Point::new(0, 10),
                MonoTextStyle::new(&ascii::FONT_6X13_BOLD, self.theme.label_text.into()),
                Alignment::Center,
            ),
        );
        paint(
            canvas,
            Text::with_alignment(
                &relationship.cardinality,
                mid + Point::new(0, 8),
                MonoTextStyle::new(&ascii::FONT_6X10, self.theme.cardinality_text.into()),
                Alignment::Center,
            ),
        );
    }
}

fn check_entity_bounds(entity: &Entity, width: u32, height: u32) -> Result<()> {
    let right = entity.x as i64 + entity.width as i64;
    let bottom = entity.y as i64 + entity.height as i64;
    if entity.x < 0 || entity.y < 0 || right > width as i64 || bottom > height as i64 {
        return Err(PdfError::InvalidDimension(format!(
            "entity '{}' at ({}, {}) size {}x{} does not fit a {width}x{height} canvas",
            entity.name, entity.x, entity.y, entity.width, entity.height
        )));
    }
    if entity.height < HEADER_HEIGHT {
        return Err(PdfError::InvalidDimension(format!(
            "entity '{}' is {}px tall, shorter than its {HEADER_HEIGHT}px header",
            entity.name, entity.height
        )));
    }
    Ok(())
}

fn draw_panel(canvas: &mut Canvas, panel: &Panel) {
    let style = PrimitiveStyleBuilder::new()
        .fill_color(panel.fill.into())
        .stroke_color(panel.border.into())
        .stroke_width(BORDER_WIDTH)
        .build();
    paint(
        canvas,
        Rectangle::new(
            Point::new(panel.x, panel.y),
            Size::new(panel.width, panel.height),
        )
        .into_styled(style),
    );
    for line in &panel.lines {
        draw_text_line(canvas, line);
    }
}

fn draw_text_line(canvas: &mut Canvas, line: &TextLine) {
    paint(
        canvas,
        Text::new(
            &line.text,
            Point::new(line.x, line.y),
            MonoTextStyle::new(mono_font(line.size, line.bold), line.color.into()),
        ),
    );
}

fn draw_caption(canvas: &mut Canvas, caption: &Caption, center_x: i32) {
    paint(
        canvas,
        Text::with_alignment(
            &caption.text,
            Point::new(center_x, caption.y),
            MonoTextStyle::new(mono_font(caption.size, caption.bold), caption.color.into()),
            Alignment::Center,
        ),
    );
}

fn mono_font(size: TextSize, bold: bool) -> &'static MonoFont<'static> {
    match (size, bold) {
        (TextSize::Small, false) => &ascii::FONT_6X12,
        (TextSize::Small, true) => &ascii::FONT_6X13_BOLD,
        (TextSize::Normal, false) => &ascii::FONT_7X14,
        (TextSize::Normal, true) => &ascii::FONT_7X14_BOLD,
        (TextSize::Large, false) => &ascii::FONT_9X18,
        (TextSize::Large, true) => &ascii::FONT_9X18_BOLD,
        (TextSize::Title, _) => &ascii::FONT_10X20,
    }
}

/// Splits a line into `dash`-long strokes separated by equal gaps.
fn dash_segments(from: (f64, f64), to: (f64, f64), dash: f64) -> Vec<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / length, dy / length);
    let at = |t: f64| (from.0 + ux * t, from.1 + uy * t);

    let mut segments = Vec::new();
    let mut t = 0.0;
    while t < length {
        segments.push((at(t), at((t + dash).min(length))));
        t += dash * 2.0;
    }
    segments
}

/// Tip and the two back corners of an arrowhead pointing along `from -> to`.
fn arrowhead(from: (f64, f64), to: (f64, f64), length: f64) -> [(f64, f64); 3] {
    let angle = (to.1 - from.1).atan2(to.0 - from.0);
    let spread = std::f64::consts::PI / 6.0;
    let corner = |a: f64| (to.0 - length * a.cos(), to.1 - length * a.sin());
    [to, corner(angle - spread), corner(angle + spread)]
}

fn to_point((x, y): (f64, f64)) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}

fn paint(canvas: &mut Canvas, drawable: impl Drawable<Color = Rgb888>) {
    match drawable.draw(canvas) {
        Ok(_) => {}
        Err(never) => match never {},
    }
}
