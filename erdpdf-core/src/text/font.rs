/// Standard Type 1 fonts available in every PDF reader without embedding.
///
/// Only the faces the report uses are listed; each is registered in the
/// page resources under its base font name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    /// Helvetica (sans-serif)
    Helvetica,
    /// Helvetica Bold
    HelveticaBold,
    /// Times Roman (serif)
    TimesRoman,
    /// Courier (monospace)
    Courier,
    /// Courier Bold
    CourierBold,
}

impl Font {
    /// Every font the writer declares in page resources.
    pub const ALL: [Font; 5] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::TimesRoman,
        Font::Courier,
        Font::CourierBold,
    ];

    /// Get the PDF base font name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::TimesRoman => "Times-Roman",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
        }
    }

    /// The bold face of the same family, if one is available.
    pub fn bold(&self) -> Font {
        match self {
            Font::Helvetica | Font::HelveticaBold => Font::HelveticaBold,
            Font::Courier | Font::CourierBold => Font::CourierBold,
            Font::TimesRoman => Font::TimesRoman,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_names() {
        assert_eq!(Font::Helvetica.pdf_name(), "Helvetica");
        assert_eq!(Font::HelveticaBold.pdf_name(), "Helvetica-Bold");
        assert_eq!(Font::CourierBold.pdf_name(), "Courier-Bold");
    }

    #[test]
    fn test_bold_face() {
        assert_eq!(Font::Helvetica.bold(), Font::HelveticaBold);
        assert_eq!(Font::Courier.bold(), Font::CourierBold);
        assert_eq!(Font::HelveticaBold.bold(), Font::HelveticaBold);
    }

    #[test]
    fn test_all_names_unique() {
        let mut names: Vec<&str> = Font::ALL.iter().map(Font::pdf_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Font::ALL.len());
    }
}
