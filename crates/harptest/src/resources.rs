//! Text resources compiled into the test binary.

use std::io::Read;

use log::debug;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// A set of resources embedded with [`embedded_resources!`](crate::embedded_resources).
///
/// Every resource is addressed by `<namespace>.<name>`, where the namespace
/// is the module path the bundle was declared in.
#[derive(Debug, Clone, Copy)]
pub struct ResourceBundle {
    namespace: &'static str,
    entries: &'static [(&'static str, &'static [u8])],
}

impl ResourceBundle {
    pub const fn new(
        namespace: &'static str,
        entries: &'static [(&'static str, &'static [u8])],
    ) -> ResourceBundle {
        Self { namespace, entries }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Fully qualified name of the resource `name`.
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}.{name}", self.namespace)
    }

    /// Logical names of the embedded resources.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + use<> {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Opens the resource `name` for reading.
    pub fn open(&self, name: &str) -> Option<impl Read + use<>> {
        self.open_qualified(&self.qualified_name(name))
    }

    /// Opens a resource by its fully qualified name.
    pub fn open_qualified(&self, qualified_name: &str) -> Option<impl Read + use<>> {
        let name = qualified_name
            .strip_prefix(self.namespace)
            .and_then(|name| name.strip_prefix('.'))?;

        self.entries
            .iter()
            .find_map(|(entry, data)| (*entry == name).then_some(*data))
    }

    /// Returns the contents of the resource `name` as text.
    ///
    /// A resource that does not exist reads as an empty string. A leading
    /// byte order mark is removed and invalid UTF-8 is replaced.
    pub fn text(&self, name: &str) -> String {
        let Some(mut stream) = self.open(name) else {
            debug!("no embedded resource {}", self.qualified_name(name));
            return String::new();
        };

        let mut data = Vec::new();
        if let Err(e) = stream.read_to_end(&mut data) {
            debug!("could not read embedded resource {}: {e}", self.qualified_name(name));
            return String::new();
        }

        let data = data.strip_prefix(UTF8_BOM).unwrap_or(&data);
        String::from_utf8_lossy(data).into_owned()
    }
}

/// Builds a [`ResourceBundle`] from files embedded with `include_bytes!`.
///
/// Paths are relative to the file the macro is invoked in and the bundle
/// namespace is the invoking module path.
///
/// ```ignore
/// const RESOURCES: ResourceBundle = harptest::embedded_resources! {
///     "Device.txt" => "resources/Device.txt",
/// };
/// ```
#[macro_export]
macro_rules! embedded_resources {
    ($($name:literal => $path:literal),* $(,)?) => {{
        const __ENTRIES: &[(&str, &[u8])] = &[$(($name, include_bytes!($path))),*];
        $crate::resources::ResourceBundle::new(module_path!(), __ENTRIES)
    }};
}
