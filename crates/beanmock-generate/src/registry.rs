//! Type value registry: the fixed table binding builtin scalar type
//! identifiers to value producers.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use beanmock_core::{Value, type_ids};

use crate::lookup::{AttrValue, Attributed, find_by};
use crate::model::{NumericRange, ValueMode};
use crate::source::{Clock, RandomSource, ScalarSource, SystemClock};

const LONG_RANGE: NumericRange = NumericRange::new(1_000_000, 1_000_000_000);
const INTEGER_RANGE: NumericRange = NumericRange::new(1000, 100_000);
const BYTE_RANGE: NumericRange = NumericRange::new(0, i8::MAX as i64);
const SHORT_RANGE: NumericRange = NumericRange::new(0, i16::MAX as i64);
const CHAR_MAX: i64 = 0xFFFF;

/// Builtin scalar kinds with a registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Long,
    Integer,
    Date,
    Boolean,
    Character,
    Byte,
    Short,
    Double,
    Float,
    List,
}

impl ScalarKind {
    pub fn rule(self) -> &'static GeneratorRule {
        &RULES[self as usize]
    }

    pub fn type_id(self) -> &'static str {
        self.rule().type_id
    }

    /// Parse a type identifier such as `"long"`.
    pub fn parse(type_id: &str) -> Option<Self> {
        find_by::<GeneratorRule>("type", &AttrValue::Str(type_id)).map(|rule| rule.kind)
    }

    /// Representable bounds for kinds whose rule accepts a range.
    pub fn bounds(self) -> Option<NumericRange> {
        match self {
            ScalarKind::Long => Some(NumericRange::new(i64::MIN, i64::MAX)),
            ScalarKind::Integer => Some(NumericRange::new(i32::MIN.into(), i32::MAX.into())),
            ScalarKind::Short => Some(NumericRange::new(i16::MIN.into(), i16::MAX.into())),
            ScalarKind::Byte => Some(NumericRange::new(i8::MIN.into(), i8::MAX.into())),
            _ => None,
        }
    }
}

type Producer = fn(Option<NumericRange>, &mut dyn ScalarSource, &dyn Clock) -> Value;

/// One row of the registry table.
#[derive(Debug)]
pub struct GeneratorRule {
    pub kind: ScalarKind,
    pub type_id: &'static str,
    pub default_range: Option<NumericRange>,
    produce: Producer,
}

impl GeneratorRule {
    pub fn produce(
        &self,
        range: Option<NumericRange>,
        source: &mut dyn ScalarSource,
        clock: &dyn Clock,
    ) -> Value {
        (self.produce)(range.or(self.default_range), source, clock)
    }
}

impl Attributed for GeneratorRule {
    fn members() -> Option<&'static [Self]> {
        Some(&RULES)
    }

    fn attribute(&self, name: &str) -> Option<AttrValue<'_>> {
        match name {
            "type" => Some(AttrValue::Str(self.type_id)),
            "ranged" => Some(AttrValue::Bool(self.default_range.is_some())),
            _ => None,
        }
    }
}

/// Rule table, in `ScalarKind` declaration order.
pub static RULES: [GeneratorRule; 10] = [
    GeneratorRule {
        kind: ScalarKind::Long,
        type_id: type_ids::LONG,
        default_range: Some(LONG_RANGE),
        produce: |range, source, _| Value::Long(draw(range, LONG_RANGE, source)),
    },
    GeneratorRule {
        kind: ScalarKind::Integer,
        type_id: type_ids::INTEGER,
        default_range: Some(INTEGER_RANGE),
        produce: |range, source, _| Value::Integer(narrow(draw(range, INTEGER_RANGE, source))),
    },
    GeneratorRule {
        kind: ScalarKind::Date,
        type_id: type_ids::DATE,
        default_range: None,
        produce: |_, _, clock| Value::Date(clock.now()),
    },
    GeneratorRule {
        kind: ScalarKind::Boolean,
        type_id: type_ids::BOOLEAN,
        default_range: None,
        produce: |_, source, _| Value::Boolean(source.random_int(0, 1) > 0),
    },
    GeneratorRule {
        kind: ScalarKind::Character,
        type_id: type_ids::CHARACTER,
        default_range: None,
        produce: |_, source, _| {
            let code = u32::try_from(source.random_int(0, CHAR_MAX)).unwrap_or_default();
            Value::Character(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
        },
    },
    GeneratorRule {
        kind: ScalarKind::Byte,
        type_id: type_ids::BYTE,
        default_range: Some(BYTE_RANGE),
        produce: |range, source, _| Value::Byte(narrow(draw(range, BYTE_RANGE, source))),
    },
    GeneratorRule {
        kind: ScalarKind::Short,
        type_id: type_ids::SHORT,
        default_range: Some(SHORT_RANGE),
        produce: |range, source, _| Value::Short(narrow(draw(range, SHORT_RANGE, source))),
    },
    GeneratorRule {
        kind: ScalarKind::Double,
        type_id: type_ids::DOUBLE,
        default_range: None,
        produce: |_, source, _| Value::Double(two_decimals(source.random_unit())),
    },
    GeneratorRule {
        kind: ScalarKind::Float,
        type_id: type_ids::FLOAT,
        default_range: None,
        produce: |_, source, _| Value::Float(two_decimals(source.random_unit()) as f32),
    },
    // Lists have no default; fields of this type are set to null.
    GeneratorRule {
        kind: ScalarKind::List,
        type_id: type_ids::LIST,
        default_range: None,
        produce: |_, _, _| Value::Null,
    },
];

fn draw(range: Option<NumericRange>, fallback: NumericRange, source: &mut dyn ScalarSource) -> i64 {
    let range = range.unwrap_or(fallback);
    source.random_int(range.min, range.max)
}

fn narrow<T: TryFrom<i64> + Default>(value: i64) -> T {
    T::try_from(value).unwrap_or_default()
}

fn two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Settings fixed at registry construction.
#[derive(Debug, Clone, Default)]
pub struct RegistrySettings {
    pub mode: ValueMode,
    /// Range overrides for ranged kinds.
    pub ranges: HashMap<ScalarKind, NumericRange>,
}

/// Exact-match table from type identifier to generator rule.
///
/// Lookup never considers subtypes. In [`ValueMode::Static`] every rule is
/// evaluated once here and each field of a registered type receives the same
/// value for the registry's lifetime.
#[derive(Debug)]
pub struct TypeValueRegistry {
    mode: ValueMode,
    index: HashMap<&'static str, &'static GeneratorRule>,
    ranges: HashMap<ScalarKind, NumericRange>,
    snapshot: HashMap<ScalarKind, Value>,
}

impl TypeValueRegistry {
    pub fn new(source: &mut dyn ScalarSource, clock: &dyn Clock) -> Self {
        Self::with_settings(RegistrySettings::default(), source, clock)
    }

    pub fn with_settings(
        settings: RegistrySettings,
        source: &mut dyn ScalarSource,
        clock: &dyn Clock,
    ) -> Self {
        let index = RULES.iter().map(|rule| (rule.type_id, rule)).collect();
        let mut registry = Self {
            mode: settings.mode,
            index,
            ranges: settings.ranges,
            snapshot: HashMap::new(),
        };
        if registry.mode == ValueMode::Static {
            registry.snapshot = RULES
                .iter()
                .map(|rule| {
                    let value = rule.produce(registry.ranges.get(&rule.kind).copied(), source, clock);
                    (rule.kind, value)
                })
                .collect();
        }
        registry
    }

    /// Process-wide registry, built exactly once on first use from OS
    /// entropy and the system clock.
    pub fn shared() -> Arc<TypeValueRegistry> {
        static SHARED: OnceLock<Arc<TypeValueRegistry>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| {
            let mut source = RandomSource::from_entropy();
            Arc::new(TypeValueRegistry::new(&mut source, &SystemClock))
        }))
    }

    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    pub fn lookup(&self, type_id: &str) -> Option<ScalarKind> {
        self.index.get(type_id).map(|rule| rule.kind)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|rule| rule.type_id)
    }

    /// Effective range of a ranged kind, overrides first.
    pub fn range(&self, kind: ScalarKind) -> Option<NumericRange> {
        self.ranges
            .get(&kind)
            .copied()
            .or(kind.rule().default_range)
    }

    pub fn value_for(
        &self,
        kind: ScalarKind,
        source: &mut dyn ScalarSource,
        clock: &dyn Clock,
    ) -> Value {
        match self.mode {
            ValueMode::Static => self.snapshot.get(&kind).cloned().unwrap_or(Value::Null),
            ValueMode::Fresh => kind.rule().produce(self.range(kind), source, clock),
        }
    }
}
