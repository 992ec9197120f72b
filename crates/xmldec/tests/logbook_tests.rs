//! Decoding a default-namespaced logbook format with container-element
//! sequences
//!
//! The format puts every element in one default namespace and wraps each
//! collection in a container element whose children are the members, which
//! is the default decoding configuration.

use time::macros::datetime;
use time::OffsetDateTime;
use xmldec::{from_str, Decoder, FromXml, Key, Namespace, Result};

const LOGBOOK_NS: &str = "http://shipbuilding.example.com/yarrgh/2019";

fn ns() -> Namespace {
    Namespace::new(LOGBOOK_NS)
}

#[derive(Debug, PartialEq)]
struct Stamp {
    time: OffsetDateTime,
    heading: f64,
    remark: Option<String>,
}

impl FromXml for Stamp {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Self {
            time: keyed.decode(&Key::element_in("time", ns()))?,
            heading: keyed.decode(&Key::element_in("heading", ns()))?,
            remark: keyed.decode_if_present(&Key::element_in("remark", ns()))?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Day {
    stamps: Vec<Stamp>,
}

impl FromXml for Day {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Self {
            stamps: keyed.decode(&Key::element_in("stamps", ns()))?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Logbook {
    days: Vec<Day>,
}

impl FromXml for Logbook {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Self {
            days: keyed.decode(&Key::element_in("days", ns()))?,
        })
    }
}

const LOGBOOK: &str = r#"
<logbook xmlns="http://shipbuilding.example.com/yarrgh/2019">
  <days>
    <day>
      <stamps>
        <stamp>
          <time>2019-07-05T09:00:00Z</time>
          <heading>270</heading>
          <remark>All quiet</remark>
        </stamp>
        <stamp>
          <time>2019-07-05T13:49:27Z</time>
          <heading>262.5</heading>
        </stamp>
      </stamps>
    </day>
    <day>
      <stamps/>
    </day>
  </days>
</logbook>
"#;

#[test]
fn test_decodes_full_logbook() -> Result<()> {
    let logbook: Logbook = from_str(LOGBOOK)?;
    assert_eq!(logbook.days.len(), 2);

    let first = &logbook.days[0].stamps;
    assert_eq!(
        first[0],
        Stamp {
            time: datetime!(2019-07-05 09:00:00 UTC),
            heading: 270.0,
            remark: Some("All quiet".to_owned()),
        }
    );
    assert_eq!(first[1].heading, 262.5);
    assert_eq!(first[1].remark, None);
    Ok(())
}

#[test]
fn test_empty_container_element_is_empty_collection() -> Result<()> {
    let logbook: Logbook = from_str(LOGBOOK)?;
    assert!(logbook.days[1].stamps.is_empty());
    Ok(())
}

#[test]
fn test_xsi_nil_remark_decodes_as_none() -> Result<()> {
    let xml = r#"
    <stamp xmlns="http://shipbuilding.example.com/yarrgh/2019"
           xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
      <time>2019-07-05T09:00:00Z</time>
      <heading>270</heading>
      <remark xsi:nil="true"/>
    </stamp>
    "#;
    let stamp: Stamp = from_str(xml)?;
    assert_eq!(stamp.remark, None);
    Ok(())
}

#[test]
fn test_repeated_siblings_are_an_error_under_default_config() {
    // Two container elements for one key is a plural match.
    let xml = r#"
    <day xmlns="http://shipbuilding.example.com/yarrgh/2019">
      <stamps/>
      <stamps/>
    </day>
    "#;
    let result: Result<Day> = from_str(xml);
    let Err(error) = result else {
        panic!("expected decoding to fail");
    };
    assert_eq!(
        error.coding_path().map(ToString::to_string),
        Some("stamps".to_owned())
    );
}

#[test]
fn test_missing_scalar_key_fails_with_path() {
    let xml = r#"
    <stamp xmlns="http://shipbuilding.example.com/yarrgh/2019">
      <heading>270</heading>
    </stamp>
    "#;
    let result: Result<Stamp> = from_str(xml);
    let Err(error) = result else {
        panic!("expected decoding to fail");
    };
    assert_eq!(
        error.coding_path().map(ToString::to_string),
        Some("time".to_owned())
    );
}
