use super::*;

#[test]
fn test_heap_clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert!(Heap::ptr_eq(&h1, &h2));
    assert_eq!(*h1, *h2);
}

#[test]
fn test_heap_eq_is_structural() {
    let h1 = Heap::new("hello".to_string());
    let h2 = Heap::new("hello".to_string());
    assert!(!Heap::ptr_eq(&h1, &h2));
    assert_eq!(h1, h2);
    assert_ne!(h1, Heap::new("world".to_string()));
}
