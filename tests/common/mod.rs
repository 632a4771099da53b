#![allow(dead_code)]

pub mod command;

pub const AUTHOR_NAME: &str = "A U Thor";
pub const AUTHOR_EMAIL: &str = "author@example.com";
const FIXED_IDENTITY: &str = "A U Thor <author@example.com> 1700000000 +0000";

/// Binary tree payload from `(mode, name, oid)` triples, in the given order
pub fn tree_payload(entries: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut payload = Vec::new();
    for (mode, name, oid) in entries {
        payload.extend_from_slice(format!("{mode} {name}\0").as_bytes());
        payload.extend_from_slice(&hex::decode(oid).expect("Invalid object id"));
    }
    payload
}

/// Commit payload with a fixed author and committer
pub fn commit_payload(tree: &str, parents: &[&str], message: &str) -> Vec<u8> {
    let mut payload = format!("tree {tree}\n");
    for parent in parents {
        payload.push_str(&format!("parent {parent}\n"));
    }
    payload.push_str(&format!("author {FIXED_IDENTITY}\n"));
    payload.push_str(&format!("committer {FIXED_IDENTITY}\n"));
    payload.push_str(&format!("\n{message}\n"));
    payload.into_bytes()
}

/// Two distinct blob contents whose object IDs share their first four hex digits
pub fn colliding_blobs() -> (String, String) {
    use sprig::artifacts::objects::envelope::Envelope;
    use sprig::artifacts::objects::object_type::ObjectType;
    use std::collections::HashMap;

    let mut seen: HashMap<String, String> = HashMap::new();
    for i in 0.. {
        let content = format!("collision candidate {i}\n");
        let oid = Envelope::object_id(&Envelope::encode(ObjectType::Blob, content.as_bytes()));
        let prefix = oid.as_ref()[..4].to_string();

        if let Some(previous) = seen.insert(prefix, content.clone()) {
            return (previous, content);
        }
    }
    unreachable!("the search only ends by returning")
}
