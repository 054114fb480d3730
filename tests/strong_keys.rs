use std::collections::HashSet;
use std::str::FromStr;

use quickcheck::quickcheck;
use strongtypes::prelude::*;

pub struct SampleKeys;

#[strong_keys(unicode)]
impl SampleKeys {
    pub const NAME_STRING: usize = 64;
    pub const DESCRIPTION_STRING: usize = 256;
}

pub struct ExactKeys;

#[strong_keys(case_sensitive)]
#[allow(dead_code)]
impl ExactKeys {
    pub const CODE_STRING: u8 = 3;
    pub const NOTE: &'static str = "not a key";
}

#[test]
fn test_sample_limits_and_flags() {
    assert_eq!(NameString::MAX_LENGTH, 64);
    assert_eq!(DescriptionString::MAX_LENGTH, 256);
    assert_eq!(NameString::COMPARISON, StringComparison::OrdinalIgnoreCase);
    assert!(NameStringConfigurator::IS_UNICODE);
    assert!(!NameStringConfigurator::IS_CASE_SENSITIVE);
    assert_eq!(CodeString::COMPARISON, StringComparison::Ordinal);
}

#[test]
fn test_length_boundary() {
    assert!(NameString::new("a".repeat(64)).is_ok());

    let error = NameString::new("a".repeat(65)).unwrap_err();
    assert_eq!(
        error,
        KeyLengthError {
            type_name: "NameString",
            max_length: 64,
            actual: 65,
        }
    );
}

#[test]
fn test_length_counts_characters() {
    assert!(CodeString::new("äöü").is_ok());
    assert!(CodeString::new("äöüß").is_err());
}

#[test]
fn test_case_rules() {
    assert_eq!(NameString::new("ABC").unwrap(), NameString::new("abc").unwrap());
    assert_ne!(CodeString::new("ABC").unwrap(), CodeString::new("abc").unwrap());

    let names: HashSet<NameString> = ["Widget", "WIDGET", "widget", "Gadget"]
        .into_iter()
        .map(|name| NameString::new(name).unwrap())
        .collect();
    assert_eq!(names.len(), 2);
}

#[test]
fn test_missing_value_and_setter() {
    let mut name = NameString::from_option(None).unwrap();
    assert_eq!(name.key_val(), "");

    name.set_key_val("Widget").unwrap();
    assert!(name.set_key_val("x".repeat(65)).is_err());
    assert_eq!(name.as_str(), "Widget");
    assert_eq!(String::from(name.clone()), "Widget");
    assert_eq!(name.into_inner(), "Widget");
}

#[test]
fn test_conversions_and_display() {
    let code = CodeString::try_from("AB1").unwrap();
    assert_eq!(code.to_string(), "CodeString { key_val = \"AB1\" }");
    assert_eq!(code.as_ref(), "AB1");
    assert!(CodeString::try_from(String::from("ABCD")).is_err());
    assert!(CodeString::from_str("ABCD").is_err());
    assert_eq!("xyz".parse::<CodeString>().unwrap().key_val(), "xyz");
}

#[test]
fn test_configurator_round_trip() {
    let configurator = NameStringConfigurator::default();
    let name = NameString::new("Widget").unwrap();

    let stored = configurator.convert_to_provider(&name);
    assert_eq!(stored, "Widget");
    assert_eq!(configurator.convert_from_provider(stored), Ok(name));
    assert!(configurator.convert_from_provider("y".repeat(65)).is_err());
}

#[test]
fn test_model_conventions() {
    let mut services = ServiceRegistry::new();
    SampleKeysDependencies::add_configurators(&mut services);

    let mut model = ModelConfigurationBuilder::new();
    model.apply(&services);

    let description = model.convention::<DescriptionString>().unwrap();
    assert_eq!(description.max_length, Some(256));
    assert_eq!(description.is_unicode, Some(true));
    assert_eq!(description.collation(), None);
}

#[test]
fn test_serde_validates_length() {
    let config = bincode::config::standard();
    let bytes = bincode::serde::encode_to_vec(CodeString::new("AB1").unwrap(), config).unwrap();
    assert_eq!(bytes, bincode::serde::encode_to_vec("AB1", config).unwrap());

    let (decoded, _): (CodeString, usize) =
        bincode::serde::decode_from_slice(&bytes, config).unwrap();
    assert_eq!(decoded.key_val(), "AB1");

    let too_long = bincode::serde::encode_to_vec("ABCD", config).unwrap();
    assert!(bincode::serde::decode_from_slice::<CodeString, _>(&too_long, config).is_err());
}

quickcheck! {
    fn prop_accepts_exactly_up_to_max(value: String) -> bool {
        NameString::new(value.clone()).is_ok() == (value.chars().count() <= NameString::MAX_LENGTH)
    }

    fn prop_round_trips_within_limit(value: String) -> bool {
        let value: String = value.chars().take(DescriptionString::MAX_LENGTH).collect();
        DescriptionString::new(value.clone()).map(DescriptionString::into_inner) == Ok(value)
    }

    fn prop_ignore_case_is_consistent(a: String, b: String) -> bool {
        let a: String = a.chars().take(64).collect();
        let b: String = b.chars().take(64).collect();
        let (left, right) = (NameString::new(a).unwrap(), NameString::new(b).unwrap());
        (left == right) == (left.cmp(&right) == std::cmp::Ordering::Equal)
    }
}

mod texts {
    use strongtypes::prelude::*;

    pub struct Texts;

    #[strong_keys]
    impl Texts {
        pub const STRING: usize = 8;
    }

    #[test]
    fn test_key_named_string_serializes_as_std_string() {
        let config = bincode::config::standard();
        let key = String::new("abc").unwrap();

        let bytes = bincode::serde::encode_to_vec(&key, config).unwrap();
        assert_eq!(bytes, bincode::serde::encode_to_vec("abc", config).unwrap());

        let (decoded, _): (String, usize) =
            bincode::serde::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(decoded, key);
    }
}
