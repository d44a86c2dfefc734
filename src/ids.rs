//! Identifier conversion between MongoDB's native `ObjectId` and the plain
//! strings exposed by the API.

use mongodb::bson::{oid::ObjectId, Bson, Document};

/// A client-supplied identifier, resolved once at the parsing boundary.
///
/// Stores may hold plain-string `_id` values alongside ObjectIds, so a
/// string that is not valid 24-hex is looked up literally instead of being
/// rejected. A malformed id therefore just fails to match anything.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupId {
    Object(ObjectId),
    Literal(String),
}

impl LookupId {
    pub fn parse(raw: &str) -> Self {
        match ObjectId::parse_str(raw) {
            Ok(oid) => LookupId::Object(oid),
            Err(_) => LookupId::Literal(raw.to_string()),
        }
    }
}

impl From<LookupId> for Bson {
    fn from(id: LookupId) -> Bson {
        match id {
            LookupId::Object(oid) => Bson::ObjectId(oid),
            LookupId::Literal(s) => Bson::String(s),
        }
    }
}

/// Renames `_id` to a stringified `id` and stringifies every other
/// store-native value (ObjectIds, datetimes) in place.
///
/// Idempotent: normalizing an already-normalized document changes nothing,
/// and a document without an `_id` passes through untouched.
pub fn normalize(mut doc: Document) -> Document {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", stringify(id));
    }
    doc.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
                Bson::DateTime(dt) => dt
                    .try_to_rfc3339_string()
                    .map(Bson::String)
                    .unwrap_or(Bson::DateTime(dt)),
                other => other,
            };
            (key, value)
        })
        .collect()
}

fn stringify(value: Bson) -> Bson {
    match value {
        Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
        Bson::String(s) => Bson::String(s),
        other => Bson::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime};

    #[test]
    fn parse_hex_is_object_id() {
        let oid = ObjectId::new();
        assert_eq!(LookupId::parse(&oid.to_hex()), LookupId::Object(oid));
    }

    #[test]
    fn parse_other_falls_back_to_literal() {
        assert_eq!(
            LookupId::parse("not-an-object-id"),
            LookupId::Literal("not-an-object-id".to_string())
        );
    }

    #[test]
    fn normalize_renames_and_stringifies_id() {
        let oid = ObjectId::new();
        let normalized = normalize(doc! { "_id": oid, "name": "Spice Garden" });
        assert!(normalized.get("_id").is_none());
        assert_eq!(normalized.get_str("id"), Ok(oid.to_hex().as_str()));
        assert_eq!(normalized.get_str("name"), Ok("Spice Garden"));
    }

    #[test]
    fn normalize_stringifies_embedded_values() {
        let owner = ObjectId::new();
        let normalized = normalize(doc! {
            "_id": ObjectId::new(),
            "owner": owner,
            "created_at": DateTime::now(),
        });
        assert_eq!(normalized.get_str("owner"), Ok(owner.to_hex().as_str()));
        assert!(normalized.get_str("created_at").is_ok());
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(doc! {
            "_id": ObjectId::new(),
            "created_at": DateTime::now(),
            "is_verified": true,
        });
        assert_eq!(normalize(once.clone()), once);
    }

    #[test]
    fn normalize_without_id_passes_through() {
        let doc = doc! { "phone": "555-0100" };
        assert_eq!(normalize(doc.clone()), doc);
    }

    #[test]
    fn normalize_keeps_literal_string_ids() {
        let normalized = normalize(doc! { "_id": "legacy-7" });
        assert_eq!(normalized.get_str("id"), Ok("legacy-7"));
    }
}
