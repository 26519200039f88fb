//! Resource scope chains.

use pdf_validation_model::{CosDocument, InheritableResources, Object};
use proptest::prelude::*;

fn layer(entries: &[(String, i64)]) -> Object {
    let sub = Object::Dictionary(
        entries
            .iter()
            .map(|(name, value)| (name.clone(), Object::Integer(*value)))
            .collect(),
    );
    Object::Dictionary([("XObject".to_string(), sub)].into_iter().collect())
}

fn snapshot(doc: &CosDocument, scope: &InheritableResources, names: &[String]) -> Vec<Option<(Object, bool)>> {
    names
        .iter()
        .map(|name| {
            scope
                .x_object(doc, name)
                .map(|d| (d.object().clone(), d.is_inherited()))
        })
        .collect()
}

#[test]
fn test_innermost_layer_wins() {
    let doc = CosDocument::new();
    let page = InheritableResources::EMPTY.extend(layer(&[("Im1".into(), 1), ("Im2".into(), 2)]));
    let form = page.extend(layer(&[("Im1".into(), 10)]));

    let im1 = form.x_object(&doc, "Im1").unwrap();
    assert_eq!(im1.object(), &Object::Integer(10));
    assert!(!im1.is_inherited());

    let im2 = form.x_object(&doc, "Im2").unwrap();
    assert_eq!(im2.object(), &Object::Integer(2));
    assert!(im2.is_inherited());

    assert!(form.x_object(&doc, "Im3").is_none());
    assert_eq!(form.layers().count(), 2);
}

#[test]
fn test_indirect_layers_and_subdictionaries() {
    let mut doc = CosDocument::new();
    let fonts = doc.add(Object::Dictionary(
        [("F1".to_string(), Object::name("Helvetica"))].into_iter().collect(),
    ));
    let resources = doc.add(Object::Dictionary(
        [("Font".to_string(), Object::Reference(fonts))].into_iter().collect(),
    ));

    let scope = InheritableResources::EMPTY.extend(Object::Reference(resources));
    let font = scope.font(&doc, "F1").unwrap();
    assert_eq!(font.object().as_name(), Some("Helvetica"));
}

#[test]
fn test_null_entry_is_absent() {
    let doc = CosDocument::new();
    let outer = InheritableResources::EMPTY.extend(layer(&[("Im1".into(), 1)]));
    let sub = Object::Dictionary([("Im1".to_string(), Object::Null)].into_iter().collect());
    let inner = outer.extend(Object::Dictionary([("XObject".to_string(), sub)].into_iter().collect()));

    // A null entry counts as undefined, so the outer definition shows through
    let im1 = inner.x_object(&doc, "Im1").unwrap();
    assert!(im1.is_inherited());
}

proptest! {
    #[test]
    fn prop_extend_never_changes_base(
        base_layers in prop::collection::vec(prop::collection::vec(("[a-d]", 0i64..100), 0..4), 0..4),
        extra in prop::collection::vec(("[a-f]", 0i64..100), 0..6),
    ) {
        let doc = CosDocument::new();
        let mut scope = InheritableResources::EMPTY;
        for entries in &base_layers {
            scope = scope.extend(layer(entries));
        }
        let names: Vec<String> = ["a", "b", "c", "d", "e", "f"].iter().map(|s| s.to_string()).collect();

        let before = snapshot(&doc, &scope, &names);
        let depth = scope.depth();
        let extended = scope.extend(layer(&extra));

        prop_assert_eq!(snapshot(&doc, &scope, &names), before);
        prop_assert_eq!(scope.depth(), depth);
        prop_assert_eq!(extended.depth(), depth + 1);

        // Names defined by the new layer come from it, everything else is inherited
        for name in &names {
            if let Some(found) = extended.x_object(&doc, name) {
                let local = extra.iter().any(|(n, _)| n == name);
                prop_assert_eq!(found.is_inherited(), !local);
            }
        }
    }
}
