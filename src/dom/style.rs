//! Inline `style` attribute reading.
//!
//! Reads every declaration of a `style="..."` attribute into an ordered
//! property map holding each property's winning value, the way CSSOM
//! exposes `element.style`.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

/// One inline declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyleProperty {
    pub name: String,
    pub value: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "std::ops::Not::not"))]
    pub important: bool,
}

/// Inline style of one element, in first-declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct InlineStyle {
    properties: Vec<StyleProperty>,
}

impl InlineStyle {
    /// Parse the contents of a `style` attribute.
    ///
    /// Invalid declarations are skipped; parsing never fails.
    ///
    /// ```
    /// use folio::dom::InlineStyle;
    ///
    /// let style = InlineStyle::parse("color: red; margin: 0 auto");
    /// assert_eq!(style.get("color"), Some("red"));
    /// assert_eq!(style.get("margin"), Some("0 auto"));
    /// ```
    pub fn parse(css: &str) -> Self {
        let mut style = InlineStyle::default();
        if css.trim().is_empty() {
            return style;
        }

        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut declarations = InlineDeclarationParser { style: &mut style };

        for result in RuleBodyParser::new(&mut parser, &mut declarations) {
            // Ignore errors - lenient parsing
            let _ = result;
        }

        style
    }

    /// Record a declaration with cascade semantics inside one block:
    /// a later declaration wins unless the earlier one is `!important`
    /// and the later one is not.
    pub fn set(&mut self, name: &str, value: &str, important: bool) {
        if let Some(existing) = self.properties.iter_mut().find(|p| p.name == name) {
            if existing.important && !important {
                return;
            }
            existing.value = value.to_string();
            existing.important = important;
            return;
        }

        self.properties.push(StyleProperty {
            name: name.to_string(),
            value: value.to_string(),
            important,
        });
    }

    /// Value of a property, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

struct InlineDeclarationParser<'a> {
    style: &'a mut InlineStyle,
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> DeclarationParser<'i> for InlineDeclarationParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        let mut end = start;
        let mut important = false;

        // Keep the source text of the value, up to a trailing `!important`.
        while !input.is_exhausted() {
            if input.try_parse(cssparser::parse_important).is_ok() {
                important = true;
                continue;
            }
            if input.next().is_err() {
                break;
            }
            if important {
                // Tokens after `!important` make the declaration invalid.
                return Err(input.new_custom_error(()));
            }
            end = input.position();
        }

        let value = input.slice(start..end).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }

        // Custom properties are case-sensitive, everything else is not.
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        self.style.set(&name, value, important);

        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for InlineDeclarationParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_declaration_order() {
        let style = InlineStyle::parse("font-weight: bold; text-align: center; margin-top: 2em");

        let names: Vec<_> = style.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["font-weight", "text-align", "margin-top"]);
        assert_eq!(style.get("margin-top"), Some("2em"));
    }

    #[test]
    fn test_later_declaration_wins() {
        let style = InlineStyle::parse("color: red; color: blue");
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("color"), Some("blue"));
    }

    #[test]
    fn test_important_beats_later_normal() {
        let style = InlineStyle::parse("color: red !important; color: blue");
        assert_eq!(style.get("color"), Some("red"));
        assert!(style.iter().next().is_some_and(|p| p.important));
    }

    #[test]
    fn test_function_values_are_kept_whole() {
        let style = InlineStyle::parse(
            "background: url(\"a;b.png\") no-repeat; color: rgb(1, 2, 3)",
        );
        assert_eq!(style.get("background"), Some("url(\"a;b.png\") no-repeat"));
        assert_eq!(style.get("color"), Some("rgb(1, 2, 3)"));
    }

    #[test]
    fn test_property_names_are_lowercased() {
        let style = InlineStyle::parse("COLOR: Red; --Accent: teal");
        assert_eq!(style.get("color"), Some("Red"));
        assert_eq!(style.get("--Accent"), Some("teal"));
    }

    #[test]
    fn test_invalid_declarations_are_skipped() {
        let style = InlineStyle::parse("color; : red; width: 10px; height:");
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("width"), Some("10px"));
    }

    #[test]
    fn test_empty_attribute() {
        assert!(InlineStyle::parse("").is_empty());
        assert!(InlineStyle::parse("  ;  ").is_empty());
    }
}
