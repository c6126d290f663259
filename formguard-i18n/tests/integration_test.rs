//! Integration tests for formguard-i18n

use formguard_i18n::*;
use formguard_validation::default_messages;
use std::fs;

#[test]
fn test_builtin_ru_covers_default_messages() {
    let dictionary = Dictionary::new();
    let defaults = [
        default_messages::REQUIRED,
        default_messages::REGEXP,
        default_messages::EMAIL,
        default_messages::TEL,
        default_messages::URL,
        default_messages::DATE,
        default_messages::TIME,
        default_messages::NUMBER,
        default_messages::INT,
        default_messages::MIN_LENGTH,
        default_messages::MAX_LENGTH,
        default_messages::MIN,
        default_messages::MAX,
        default_messages::FILESIZE,
        default_messages::EXTENSION,
        "Can not send form!",
        "JSON parsing error",
    ];

    for message in defaults {
        assert!(dictionary.has(message, "ru"), "missing ru translation for {:?}", message);
        assert_ne!(dictionary.translate(message, "ru"), message);
    }
}

#[test]
fn test_load_from_dir() {
    let dir = std::env::temp_dir().join(format!("formguard-i18n-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("de.json"), r#"{"The value is too long": "Der Wert ist zu lang"}"#).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let dictionary = Dictionary::new();
    dictionary.load_from_dir(&dir).unwrap();

    assert_eq!(
        dictionary.translate(default_messages::MAX_LENGTH, "de-AT"),
        "Der Wert ist zu lang"
    );
    assert!(dictionary.languages().contains(&"de".to_string()));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_dir_is_io_error() {
    let result = Dictionary::new().load_from_dir("/nonexistent/locales");
    assert!(matches!(result, Err(I18nError::IoError(_))));
}

#[tokio::test]
async fn test_concurrent_readers_and_writer() {
    let dictionary = Dictionary::new();

    let mut handles = Vec::new();
    for i in 0..8 {
        let dictionary = dictionary.clone();
        handles.push(tokio::spawn(async move {
            dictionary.add_translation(&format!("key {}", i), &format!("ключ {}", i), "ru");
            dictionary.translate(default_messages::REQUIRED, "ru")
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "Это поле обязательно для заполнения");
    }
    assert!(dictionary.has("key 7", "ru"));
}
