//! Decoding a namespaced contact-list format with flat sequences
//!
//! The format qualifies every element and attribute with one namespace and
//! represents collections as repeated sibling elements, so decoding runs
//! with `sequences_use_container_elements` disabled.

use xmldec::{
    from_str_with_config, Decoder, DecodingConfiguration, FromXml, Key, Namespace, Result,
};

const CONTACTS_NS: &str = "http://example.org/my-contact-lists/2019a";

fn ns() -> Namespace {
    Namespace::new(CONTACTS_NS)
}

#[derive(Debug, PartialEq)]
enum Gender {
    Female,
    Male,
    Other,
}

impl FromXml for Gender {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        match decoder.single_value().decode_string()?.as_str() {
            "f" => Ok(Self::Female),
            "m" => Ok(Self::Male),
            _ => Ok(Self::Other),
        }
    }
}

#[derive(Debug, PartialEq)]
struct Person {
    first_name: String,
    last_name: String,
    gender: Gender,
    hobbies: Vec<String>,
}

impl FromXml for Person {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Self {
            first_name: keyed.decode(&Key::attribute_in("firstName", ns()))?,
            last_name: keyed.decode(&Key::attribute_in("lastName", ns()))?,
            gender: keyed.decode(&Key::element_in("gender", ns()))?,
            hobbies: keyed.decode(&Key::element_in("hobby", ns()))?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct ContactList {
    people: Vec<Person>,
}

impl FromXml for ContactList {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Self {
            people: keyed.decode(&Key::element_in("person", ns()))?,
        })
    }
}

fn flat_config() -> DecodingConfiguration {
    let mut config = DecodingConfiguration::default();
    config.sequences_use_container_elements = false;
    config
}

const CONTACT_LIST: &str = r#"
<c:contacts xmlns:c="http://example.org/my-contact-lists/2019a">
  <c:person c:firstName="Jake" c:lastName="Andrews">
    <c:gender>m</c:gender>
    <c:hobby>Hiking</c:hobby>
    <c:hobby>Crosswords</c:hobby>
  </c:person>
  <c:person c:firstName="Marisol" c:lastName="Ayala">
    <c:gender>f</c:gender>
    <c:hobby>Chess</c:hobby>
  </c:person>
</c:contacts>
"#;

#[test]
fn test_decodes_full_contact_list() -> Result<()> {
    let list: ContactList = from_str_with_config(CONTACT_LIST, &flat_config())?;
    assert_eq!(
        list,
        ContactList {
            people: vec![
                Person {
                    first_name: "Jake".to_owned(),
                    last_name: "Andrews".to_owned(),
                    gender: Gender::Male,
                    hobbies: vec!["Hiking".to_owned(), "Crosswords".to_owned()],
                },
                Person {
                    first_name: "Marisol".to_owned(),
                    last_name: "Ayala".to_owned(),
                    gender: Gender::Female,
                    hobbies: vec!["Chess".to_owned()],
                },
            ],
        }
    );
    Ok(())
}

#[test]
fn test_person_without_hobbies_decodes_empty_collection() -> Result<()> {
    let xml = r#"
    <c:contacts xmlns:c="http://example.org/my-contact-lists/2019a">
      <c:person c:firstName="Alex" c:lastName="Reyes">
        <c:gender>x</c:gender>
      </c:person>
    </c:contacts>
    "#;
    let list: ContactList = from_str_with_config(xml, &flat_config())?;
    assert_eq!(list.people[0].hobbies, Vec::<String>::new());
    assert_eq!(list.people[0].gender, Gender::Other);
    Ok(())
}

#[test]
fn test_namespace_mismatch_is_key_not_found() {
    // Same local name, but the attribute's prefix binds another namespace.
    let xml = r#"
    <c:contacts xmlns:c="http://example.org/my-contact-lists/2019a"
                xmlns:o="http://example.org/other">
      <c:person o:firstName="Jake" c:lastName="Andrews">
        <c:gender>m</c:gender>
      </c:person>
    </c:contacts>
    "#;
    let result: Result<ContactList> = from_str_with_config(xml, &flat_config());
    let Err(error) = result else {
        panic!("expected decoding to fail");
    };
    assert_eq!(
        error.coding_path().map(ToString::to_string),
        Some("person[0].@firstName".to_owned())
    );
}

#[test]
fn test_prefix_choice_is_irrelevant() -> Result<()> {
    // A different prefix bound to the same namespace decodes identically.
    let xml = r#"
    <list:contacts xmlns:list="http://example.org/my-contact-lists/2019a">
      <list:person list:firstName="Jake" list:lastName="Andrews">
        <list:gender>m</list:gender>
        <list:hobby>Hiking</list:hobby>
      </list:person>
    </list:contacts>
    "#;
    let list: ContactList = from_str_with_config(xml, &flat_config())?;
    assert_eq!(list.people[0].first_name, "Jake");
    assert_eq!(list.people[0].hobbies, vec!["Hiking".to_owned()]);
    Ok(())
}
