//! Property-based tests
//!
//! Invariants that must hold for arbitrary identifiers, contents and frames.

use std::sync::Arc;

use proptest::prelude::*;

use pairchat::backend::chat::memory::MemoryRoomStore;
use pairchat::backend::chat::store::RoomStore;
use pairchat::shared::event::ClientEvent;
use pairchat::shared::messaging::{canonical_key, ChatMessage, RoomKey};

fn identifier() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,16}"
}

proptest! {
    #[test]
    fn canonical_key_is_symmetric(a in identifier(), b in identifier()) {
        prop_assume!(a != b);
        let ab = canonical_key(&a, &b).unwrap();
        let ba = canonical_key(&b, &a).unwrap();
        prop_assert_eq!(&ab, &ba);

        let (lo, hi) = if a < b { (&a, &b) } else { (&b, &a) };
        prop_assert_eq!(ab, format!("{}-{}", lo, hi));
    }

    #[test]
    fn identical_participants_never_form_a_key(a in identifier()) {
        prop_assert!(RoomKey::new(a.clone(), a).is_err());
    }

    #[test]
    fn parse_inverts_display(a in identifier(), b in identifier()) {
        prop_assume!(a != b);
        let key = RoomKey::new(a, b).unwrap();
        let parsed = RoomKey::parse(&key.to_string()).unwrap();
        prop_assert_eq!(parsed, key);
    }

    #[test]
    fn decode_never_panics(text in ".{0,200}") {
        let _ = ClientEvent::decode(&text);
    }

    #[test]
    fn decode_rejects_unknown_events(name in "[a-z]{1,12}") {
        let known = [
            "join", "leave", "chat_request", "join_chat", "send_message",
            "chat_accepted", "leave_chat", "delete_chat",
        ];
        prop_assume!(!known.contains(&name.as_str()));
        let frame = format!(r#"{{"event":"{}","data":{{}}}}"#, name);
        prop_assert!(ClientEvent::decode(&frame).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_append_is_kept_in_order(contents in prop::collection::vec("[a-z ]{1,20}", 1..20)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let stored = runtime.block_on(async {
            let store = Arc::new(MemoryRoomStore::new());
            let key = RoomKey::new("alice", "bob").unwrap();
            let room = store.find_or_create(&key).await.unwrap();
            for (i, content) in contents.iter().enumerate() {
                let sender = if i % 2 == 0 { "alice" } else { "bob" };
                store
                    .append_message(room.id, ChatMessage::new(sender, content.clone(), None))
                    .await
                    .unwrap();
            }
            store.find_by_key(&key).await.unwrap().unwrap()
        });

        let stored_contents: Vec<_> = stored.messages.into_iter().map(|m| m.content).collect();
        prop_assert_eq!(stored_contents, contents);
    }
}
