use super::*;

#[test]
fn test_logically_equal_keys_are_distinct_entries() {
    let k = Arc::new(String::from("key"));
    let k2 = Arc::new(String::from("key"));
    assert_eq!(k, k2);

    let mut map = IdentityMap::new();
    assert_eq!(map.put(&k, 1), None);
    assert_eq!(map.get(&k), Some(&1));
    assert_eq!(map.get(&k2), None);

    assert_eq!(map.put(&k2, 2), None);
    assert_eq!(map.get(&k), Some(&1));
    assert_eq!(map.get(&k2), Some(&2));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_put_returns_previous_value_for_same_reference() {
    let k = Arc::new(vec![1, 2, 3]);
    let alias = Arc::clone(&k);

    let mut map = IdentityMap::new();
    map.put(&k, "first");
    assert_eq!(map.put(&alias, "second"), Some("first"));
    assert_eq!(map.get(&k), Some(&"second"));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_remove_and_contains() {
    let k = Arc::new(0u8);
    let mut map = IdentityMap::new();
    map.put(&k, 'x');
    assert!(map.contains_key(&k));
    assert_eq!(map.remove(&k), Some('x'));
    assert!(!map.contains_key(&k));
    assert!(map.is_empty());
}

#[test]
fn test_unsized_keys() {
    let k: Arc<str> = Arc::from("a");
    let k2: Arc<str> = Arc::from("a");
    let mut map: IdentityMap<str, u32> = IdentityMap::new();
    map.put(&k, 7);
    assert_eq!(map.get(&k), Some(&7));
    assert_eq!(map.get(&k2), None);
}

#[test]
fn test_same_is_identity() {
    let a = Arc::new(5);
    let b = Arc::new(5);
    assert!(same(&a, &Arc::clone(&a)));
    assert!(!same(&a, &b));
}
