//! Reverse lookup of enumerated members by a named attribute.

/// Attribute value exposed by an [`Attributed`] type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue<'a> {
    Str(&'a str),
    Int(i64),
    Bool(bool),
}

/// A type whose values expose named attributes.
///
/// Enumerated types (closed member sets) also return their members; other
/// types keep the default and are never searched.
pub trait Attributed: Sized + 'static {
    fn members() -> Option<&'static [Self]> {
        None
    }

    fn attribute(&self, name: &str) -> Option<AttrValue<'_>>;
}

/// Find the first member of `E` whose `attribute` equals `target`.
///
/// Returns `None` when `E` is not enumerated, when no member exposes the
/// attribute, or when nothing matches.
pub fn find_by<E: Attributed>(attribute: &str, target: &AttrValue<'_>) -> Option<&'static E> {
    E::members()?
        .iter()
        .find(|member| member.attribute(attribute).as_ref() == Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Level {
        Low,
        Mid,
        High,
        Legacy,
    }

    static LEVELS: [Level; 4] = [Level::Low, Level::Mid, Level::High, Level::Legacy];

    impl Attributed for Level {
        fn members() -> Option<&'static [Self]> {
            Some(&LEVELS)
        }

        fn attribute(&self, name: &str) -> Option<AttrValue<'_>> {
            match name {
                "code" => Some(AttrValue::Str(match self {
                    Level::Low => "l",
                    Level::Mid => "m",
                    Level::High | Level::Legacy => "h",
                })),
                "rank" => Some(AttrValue::Int(match self {
                    Level::Low => 1,
                    Level::Mid => 2,
                    Level::High | Level::Legacy => 3,
                })),
                "deprecated" if matches!(self, Level::Legacy) => Some(AttrValue::Bool(true)),
                _ => None,
            }
        }
    }

    struct Plain {
        code: &'static str,
    }

    impl Attributed for Plain {
        fn attribute(&self, name: &str) -> Option<AttrValue<'_>> {
            (name == "code").then_some(AttrValue::Str(self.code))
        }
    }

    #[test]
    fn finds_first_matching_member() {
        assert_eq!(find_by::<Level>("code", &AttrValue::Str("m")), Some(&Level::Mid));
        assert_eq!(find_by::<Level>("rank", &AttrValue::Int(3)), Some(&Level::High));
        assert_eq!(
            find_by::<Level>("deprecated", &AttrValue::Bool(true)),
            Some(&Level::Legacy)
        );
    }

    #[test]
    fn missing_attribute_or_value_yields_none() {
        assert!(find_by::<Level>("code", &AttrValue::Str("x")).is_none());
        assert!(find_by::<Level>("color", &AttrValue::Str("l")).is_none());
        assert!(find_by::<Level>("rank", &AttrValue::Str("1")).is_none());
    }

    #[test]
    fn non_enumerated_types_yield_none() {
        let plain = Plain { code: "l" };
        assert_eq!(plain.attribute("code"), Some(AttrValue::Str("l")));
        assert!(find_by::<Plain>("code", &AttrValue::Str("l")).is_none());
    }
}
