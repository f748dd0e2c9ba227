use sentinel_list::arena::{Arena, Handle};
use sentinel_list::{Error, LinkedList};

#[test]
fn new_is_empty() {
    let arena: Arena<i32> = Arena::new();
    assert!(arena.is_empty());
    assert_eq!(arena.len(), 0);
}

#[test]
fn insert_and_get() {
    let mut arena = Arena::new();
    let h = arena.insert("hello".to_string());
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.get(h).map(|s| s.as_str()), Some("hello"));
}

#[test]
fn get_mut_allows_update() {
    let mut arena = Arena::new();
    let h = arena.insert(1);
    *arena.get_mut(h).unwrap() = 2;
    assert_eq!(arena.get(h), Some(&2));
}

#[test]
fn remove_makes_handle_invalid() {
    let mut arena = Arena::new();
    let h = arena.insert(123);
    assert_eq!(arena.remove(h), Some(123));
    assert_eq!(arena.get(h), None);
    assert!(!arena.contains(h));
    assert!(arena.is_empty());
}

#[test]
fn removing_twice_is_a_no_op() {
    let mut arena = Arena::new();
    let h = arena.insert(5);
    assert_eq!(arena.remove(h), Some(5));
    assert_eq!(arena.remove(h), None);
    assert_eq!(arena.len(), 0);
}

#[test]
fn slot_reuse_increments_generation() {
    let mut arena = Arena::new();
    let h1 = arena.insert('a');
    let idx = h1.index();
    let gen = h1.generation();

    assert_eq!(arena.remove(h1), Some('a'));

    let h2 = arena.insert('b');
    assert_eq!(h2.index(), idx);
    assert_eq!(h2.generation(), gen + 1);

    assert_eq!(arena.get(h1), None);
    assert_eq!(arena.get(h2), Some(&'b'));
}

#[test]
fn stale_handles_do_not_resurrect_values() {
    let mut arena = Arena::new();

    let h1 = arena.insert(10);
    let idx = h1.index();

    assert_eq!(arena.remove(h1), Some(10));

    // Reuse the same slot multiple times.
    let h2 = arena.insert(20);
    assert_eq!(h2.index(), idx);
    assert_eq!(arena.remove(h2), Some(20));

    let h3 = arena.insert(30);
    assert_eq!(h3.index(), idx);

    assert_eq!(arena.get(h1), None);
    assert_eq!(arena.get(h2), None);
    assert_eq!(arena.get(h3), Some(&30));
}

#[test]
fn len_tracks_live_values_only() {
    let mut arena = Arena::new();
    let a = arena.insert(1);
    let b = arena.insert(2);
    let c = arena.insert(3);
    assert_eq!(arena.len(), 3);

    arena.remove(b);
    assert_eq!(arena.len(), 2);

    arena.remove(a);
    arena.remove(c);
    assert_eq!(arena.len(), 0);
    assert!(arena.is_empty());
}

#[test]
fn freed_slots_are_reused_before_growing() {
    let mut arena = Arena::with_capacity(2);
    let a = arena.insert(1);
    let b = arena.insert(2);
    arena.remove(a);
    arena.remove(b);

    let c = arena.try_insert(3).unwrap();
    let d = arena.try_insert(4).unwrap();
    assert_eq!(c.index(), b.index());
    assert_eq!(d.index(), a.index());
    assert_eq!(arena.len(), 2);
}

#[test]
fn list_positions_go_stale_when_their_slot_is_reused() {
    let mut list = LinkedList::from([1, 2, 3]);
    let front = list.begin().position();
    let end = list.end().position();

    for round in 0..50 {
        assert_eq!(list.pop_front(), Some(round + 1));
        list.push_back(round + 4);
    }

    // Every churned slot came back with a newer generation.
    assert_eq!(list.get(front), None);
    assert_eq!(list.erase(front), Err(Error::StalePosition));

    let live = list.begin().position();
    assert_eq!(list.get(live), Some(&51));
    assert_eq!(list.distance(live, end), Ok(3));
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [51, 52, 53]);
}

#[test]
fn positions_survive_churn_on_other_nodes() {
    let mut list = LinkedList::from(['a', 'b', 'c']);
    let middle = (list.begin() + 1).position();

    for _ in 0..20 {
        list.push_front('x');
        list.push_back('y');
        list.pop_front();
        list.pop_back();
    }
    assert_eq!(list.get(middle), Some(&'b'));
    assert_eq!(list.remove(middle), Ok('b'));
    assert_eq!(list.get(middle), None);
}

struct Link {
    value: u32,
    next: Option<Handle>,
}

fn walk(arena: &Arena<Link>, mut at: Option<Handle>) -> Vec<u32> {
    let mut values = Vec::new();
    while let Some(handle) = at {
        let link = arena.get(handle).unwrap();
        values.push(link.value);
        at = link.next;
    }
    values
}

#[test]
fn handle_linked_chain_stays_consistent_after_churn() {
    let mut arena = Arena::new();
    let mut head = None;
    for value in (0..8).rev() {
        head = Some(arena.insert(Link { value, next: head }));
    }
    assert_eq!(walk(&arena, head), (0..8).collect::<Vec<_>>());

    // Unlink every odd value, then relink fresh nodes in their place.
    let mut at = head;
    while let Some(handle) = at {
        let next = arena.get(handle).unwrap().next;
        let Some(odd) = next else { break };
        let after = arena.remove(odd).unwrap().next;
        arena.get_mut(handle).unwrap().next = after;
        assert!(!arena.contains(odd));
        at = after;
    }
    assert_eq!(walk(&arena, head), [0, 2, 4, 6]);
    assert_eq!(arena.len(), 4);

    let slots = arena.capacity();
    let mut at = head;
    while let Some(handle) = at {
        let next = arena.get(handle).unwrap().next;
        let value = arena.get(handle).unwrap().value + 1;
        let fresh = arena.insert(Link { value, next });
        arena.get_mut(handle).unwrap().next = Some(fresh);
        at = next;
    }
    assert_eq!(walk(&arena, head), (0..8).collect::<Vec<_>>());
    assert_eq!(arena.len(), 8);
    assert_eq!(arena.capacity(), slots);
}
