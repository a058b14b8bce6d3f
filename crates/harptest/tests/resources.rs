use std::io::Read;

use harptest::{ResourceBundle, embedded_resources};

const RESOURCES: ResourceBundle = embedded_resources! {
    "Registers.txt" => "data/Registers.txt",
    "Plain.txt" => "data/Plain.txt",
};

#[test]
fn namespace_is_invoking_module() {
    assert_eq!(RESOURCES.namespace(), module_path!());
    assert_eq!(
        RESOURCES.qualified_name("Plain.txt"),
        format!("{}.Plain.txt", module_path!())
    );
}

#[test]
fn embedded_text() {
    assert_eq!(RESOURCES.text("Plain.txt"), "plain resource");
    assert_eq!(
        RESOURCES.text("Registers.txt"),
        "Digital input state\nOutput set\n"
    );
}

#[test]
fn embedded_stream_keeps_raw_bytes() {
    let mut data = Vec::new();
    RESOURCES
        .open("Registers.txt")
        .unwrap()
        .read_to_end(&mut data)
        .unwrap();
    assert!(data.starts_with(b"\xef\xbb\xbf"));
}

#[test]
fn missing_resource_is_empty() {
    for name in ["Missing.txt", "plain.txt", "data/Plain.txt"] {
        assert!(RESOURCES.open(name).is_none());
        assert_eq!(RESOURCES.text(name), "");
    }
}

mod nested {
    use harptest::{ResourceBundle, embedded_resources};

    pub const RESOURCES: ResourceBundle = embedded_resources! {
        "Plain.txt" => "data/Plain.txt",
    };
}

#[test]
fn nested_module_namespace() {
    assert_eq!(nested::RESOURCES.namespace(), "resources::nested");
    assert_ne!(nested::RESOURCES.namespace(), RESOURCES.namespace());
    assert_eq!(nested::RESOURCES.text("Plain.txt"), "plain resource");
    assert!(
        RESOURCES
            .open_qualified(&nested::RESOURCES.qualified_name("Plain.txt"))
            .is_none()
    );
}
