//! Widget identity.
//!
//! Widgets are addressed by [`WidgetId`], a generational slotmap key. Keys
//! are cheap to copy and remain distinguishable from later re-uses of the
//! same slot, so stale non-owning references (focus-path entries, drag
//! capture) can never silently alias a new widget.

use slotmap::new_key_type;

new_key_type! {
    /// Identity of a widget node inside a tree arena.
    pub struct WidgetId;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_stale_id_does_not_alias() {
        let mut map: SlotMap<WidgetId, u32> = SlotMap::with_key();
        let a = map.insert(1);
        map.remove(a);
        let b = map.insert(2);
        assert_ne!(a, b);
        assert!(map.get(a).is_none());
        assert_eq!(map.get(b), Some(&2));
    }
}
