//! Key-value list with message
//!
//! The header-plus-body grammar shared by commit and tag payloads:
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author A U Thor <author@example.com> 1527025023 +0200
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  iQIzBAABCAAdFiEExwXquOM8bWb4Q2zVGxM2FxoLkGQFAlsEjZQACgkQGxM2FxoL
//!  -----END PGP SIGNATURE-----
//!
//! Create first draft
//! ```
//!
//! A value continues onto the next line when that line starts with a single space; the
//! space is dropped when parsing and put back when serializing. Repeated keys accumulate
//! their values in one field, in the order they appear. The first empty line ends the
//! header and everything after it is the message.

use crate::errors::SprigError;

/// Key of the pseudo-record holding the free-text message
pub const MESSAGE_KEY: &str = "";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kvlm {
    fields: Vec<(String, Vec<String>)>,
    message: Option<String>,
}

impl Kvlm {
    pub fn parse(payload: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| SprigError::malformed("key-value list is not valid UTF-8"))?;

        let mut kvlm = Kvlm::default();
        let mut rest = text;

        loop {
            match (rest.find(' '), rest.find('\n')) {
                (Some(space), Some(newline)) if space < newline => {
                    if space == 0 {
                        return Err(SprigError::malformed("empty key in key-value list").into());
                    }

                    let end = Self::value_end(rest, space + 1)?;
                    let value = rest[space + 1..end].replace("\n ", "\n");
                    kvlm.push(&rest[..space], value);

                    rest = &rest[end + 1..];
                }
                (_, Some(0)) => {
                    kvlm.message = Some(rest[1..].to_string());
                    return Ok(kvlm);
                }
                _ => {
                    return Err(SprigError::malformed("expected blank line before message").into());
                }
            }
        }
    }

    /// Offset of the newline that terminates the value starting at `from`
    fn value_end(text: &str, from: usize) -> anyhow::Result<usize> {
        let bytes = text.as_bytes();
        let mut from = from;

        loop {
            let newline = text[from..]
                .find('\n')
                .map(|offset| from + offset)
                .ok_or_else(|| SprigError::malformed("unterminated value in key-value list"))?;

            if bytes.get(newline + 1) == Some(&b' ') {
                from = newline + 1;
            } else {
                return Ok(newline);
            }
        }
    }

    pub fn serialize(&self) -> String {
        let mut content = String::new();

        for (key, values) in &self.fields {
            for value in values {
                content.push_str(key);
                content.push(' ');
                content.push_str(&value.replace('\n', "\n "));
                content.push('\n');
            }
        }

        content.push('\n');
        content.push_str(self.message());

        content
    }

    /// Append a value, joining an existing field with the same key
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();

        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((key.to_string(), vec![value])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// All records in order, the message last under [`MESSAGE_KEY`] when present
    pub fn records(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
            .chain(
                self.message
                    .as_ref()
                    .map(|message| (MESSAGE_KEY, std::slice::from_ref(message))),
            )
    }
}
