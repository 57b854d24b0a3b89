use serde::{
    Deserialize,
    de::{DeserializeOwned, value::MapDeserializer},
};

/// Raw key/value pairs from a url-encoded body, in the order they were posted.
#[derive(Debug, Clone, Default)]
pub struct FormValues(Vec<(String, String)>);

impl FormValues {
    /// First value posted for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Maps the pairs onto `T` by field name. Keys `T` doesn't know about are skipped.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde::de::value::Error> {
        let pairs = self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        Deserialize::deserialize(MapDeserializer::new(pairs))
    }
}

impl From<Vec<(String, String)>> for FormValues {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}
