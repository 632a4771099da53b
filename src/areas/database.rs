use crate::artifacts::objects::envelope::Envelope;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::SprigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content-addressed object store rooted at `.git/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object under its content address and return that address
    ///
    /// Storing content that is already present leaves the existing file untouched.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let content = object.encode()?;
        let oid = Envelope::object_id(&content);
        let object_path = self.path.join(oid.to_path());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, content)?;
            debug!(%oid, object_type = %object.object_type(), "stored object");
        }

        Ok(oid)
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).is_file()
    }

    /// Load any object, dispatching on the type recorded in its envelope
    pub fn load(&self, oid: &ObjectId) -> anyhow::Result<ObjectBox> {
        let envelope = self.read_envelope(oid)?;

        ObjectBox::deserialize(envelope.object_type, &envelope.payload)
            .with_context(|| format!("Unable to parse object {}", oid))
    }

    /// Load an object that must be of kind `T`
    pub fn load_as<T: Unpackable>(&self, oid: &ObjectId) -> anyhow::Result<T> {
        let envelope = self.read_envelope(oid)?;

        if envelope.object_type != T::OBJECT_TYPE {
            return Err(SprigError::TypeMismatch {
                oid: oid.clone(),
                expected: T::OBJECT_TYPE,
                actual: envelope.object_type,
            }
            .into());
        }

        T::deserialize(&envelope.payload).with_context(|| format!("Unable to parse object {}", oid))
    }

    /// Type tag of a stored object
    pub fn object_type(&self, oid: &ObjectId) -> anyhow::Result<ObjectType> {
        Ok(self.read_envelope(oid)?.object_type)
    }

    fn read_envelope(&self, oid: &ObjectId) -> anyhow::Result<Envelope> {
        let object_path = self.path.join(oid.to_path());
        if !object_path.is_file() {
            return Err(SprigError::ObjectNotFound(oid.clone()).into());
        }

        let content = self.read_object(object_path)?;

        if &Envelope::object_id(&content) != oid {
            return Err(SprigError::malformed(format!("hash mismatch for {}", oid)).into());
        }

        Envelope::decode(&content)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        if let Err(err) = file.write_all(&object_content) {
            // best effort cleanup, the write error is reported
            let _ = std::fs::remove_file(&temp_object_path);
            return Err(err).context(format!(
                "Unable to write object file {}",
                temp_object_path.display()
            ));
        }

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|err| SprigError::malformed(format!("corrupt compressed stream: {err}")))?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all stored objects whose ID starts with `prefix`
    ///
    /// Only the fan-out directory named by the first two characters is scanned, so the
    /// prefix must have at least two characters. A missing directory yields no matches.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() < 2 || !prefix.is_ascii() {
            anyhow::bail!("object prefix {prefix:?} is too short to scan");
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)
            .with_context(|| format!("Unable to scan object directory {}", dir_path.display()))?
        {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix) {
                // temp files and other strays are not objects
                if let Ok(oid) = ObjectId::try_parse(format!("{}{}", dir_name, file_name)) {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }
}
