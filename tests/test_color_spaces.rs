//! Color space resolution against hand-built documents.

use pdf_validation_model::colors::{ColorSpace, ColorSpaceFamily};
use pdf_validation_model::{CosDocument, Descriptor, InheritableResources, ModelSession, Object, ObjectRef};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dict(entries: Vec<(&str, Object)>) -> Object {
    Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Minimal ICC profile: just the 128-byte header.
fn icc_profile(color_space: &[u8; 4]) -> Vec<u8> {
    let mut data = vec![0u8; 128];
    data[0..4].copy_from_slice(&128u32.to_be_bytes());
    data[8] = 4;
    data[12..16].copy_from_slice(b"prtr");
    data[16..20].copy_from_slice(color_space);
    data[20..24].copy_from_slice(b"Lab ");
    data[36..40].copy_from_slice(b"acsp");
    data
}

fn icc_based(doc: &mut CosDocument, n: i64, color_space: &[u8; 4]) -> ObjectRef {
    let stream = doc.add(Object::Stream {
        dict: [("N".to_string(), Object::Integer(n))].into_iter().collect(),
        data: bytes::Bytes::from(icc_profile(color_space)),
    });
    doc.add(Object::Array(vec![Object::name("ICCBased"), Object::Reference(stream)]))
}

#[test]
fn test_cached_instance_is_shared() {
    init_logging();
    let mut doc = CosDocument::new();
    let cal_rgb = doc.add(Object::Array(vec![
        Object::name("CalRGB"),
        dict(vec![(
            "WhitePoint",
            Object::Array(vec![Object::Real(0.9505), Object::Integer(1), Object::Real(1.089)]),
        )]),
    ]));
    let icc = icc_based(&mut doc, 3, b"RGB ");
    let device_n = doc.add(Object::Array(vec![
        Object::name("DeviceN"),
        Object::Array(vec![Object::name("Orange"), Object::name("Green")]),
        Object::name("DeviceCMYK"),
        dict(vec![("FunctionType", Object::Integer(4))]),
    ]));

    let mut session = ModelSession::new(&doc);
    for r in [cal_rgb, icc, device_n] {
        let descriptor = Descriptor::new(Object::Reference(r));
        let first = session.color_space(Some(&descriptor)).unwrap();
        let second = session.color_space(Some(&descriptor)).unwrap();
        assert!(Arc::ptr_eq(&first, &second), "{} resolved twice", first.family());
    }

    let stats = session.cache().stats();
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.hits, 3);
}

#[test]
fn test_structurally_equal_objects_are_distinct() {
    let mut doc = CosDocument::new();
    let lab = || Object::Array(vec![Object::name("Lab"), dict(vec![])]);
    let a = doc.add(lab());
    let b = doc.add(lab());

    let mut session = ModelSession::new(&doc);
    let first = session.color_space(Some(&Descriptor::new(Object::Reference(a)))).unwrap();
    let second = session.color_space(Some(&Descriptor::new(Object::Reference(b)))).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_cmyk_icc_is_never_cached() {
    init_logging();
    let mut doc = CosDocument::new();
    let icc = icc_based(&mut doc, 4, b"CMYK");
    let descriptor = Descriptor::new(Object::Reference(icc));
    let scope = InheritableResources::EMPTY;

    let mut session = ModelSession::new(&doc);
    let a = session.color_space_with_context(Some(&descriptor), None, &scope, 0, false).unwrap();
    let b = session.color_space_with_context(Some(&descriptor), None, &scope, 1, true).unwrap();
    let c = session.color_space_with_context(Some(&descriptor), None, &scope, 1, true).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&b, &c));
    for (cs, mode, flag) in [(&a, 0, false), (&b, 1, true), (&c, 1, true)] {
        match cs.as_ref() {
            ColorSpace::IccBasedCmyk(cmyk) => {
                assert_eq!(cmyk.overprint_mode, mode);
                assert_eq!(cmyk.overprint_flag, flag);
                assert_eq!(cmyk.icc.profile.as_ref().map(|p| p.color_space.as_str()), Some("CMYK"));
            },
            other => panic!("Expected ICCBasedCMYK, got {}", other.family()),
        }
    }
    assert!(!session.cache().contains(icc));
}

#[test]
fn test_device_singletons() {
    let mut doc = CosDocument::new();
    let indirect = doc.add(Object::name("DeviceCMYK"));

    let mut session = ModelSession::new(&doc);
    let descriptors = [
        Descriptor::new(Object::name("DeviceCMYK")),
        Descriptor::new(Object::name("CMYK")),
        Descriptor::new(Object::Reference(indirect)),
    ];
    for descriptor in &descriptors {
        let resolved = session.color_space(Some(descriptor)).unwrap();
        assert!(Arc::ptr_eq(&resolved, &ColorSpace::device_cmyk(false)));
    }

    let inherited = session
        .color_space(Some(&Descriptor::inherited(Object::name("DeviceCMYK"))))
        .unwrap();
    assert!(Arc::ptr_eq(&inherited, &ColorSpace::device_cmyk(true)));
    assert!(!Arc::ptr_eq(&inherited, &ColorSpace::device_cmyk(false)));

    // Device spaces are not cache entries
    assert!(session.cache().is_empty());
}

#[test]
fn test_singletons_shared_across_sessions() {
    let doc = CosDocument::new();
    let descriptor = Descriptor::new(Object::name("DeviceGray"));
    let a = ModelSession::new(&doc).color_space(Some(&descriptor)).unwrap();
    let b = ModelSession::new(&doc).color_space(Some(&descriptor)).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_indexed_over_separation_over_cmyk() {
    init_logging();
    let mut doc = CosDocument::new();
    let separation = doc.add(Object::Array(vec![
        Object::name("Separation"),
        Object::name("PANTONE 300 C"),
        Object::name("DeviceCMYK"),
        dict(vec![("FunctionType", Object::Integer(2))]),
    ]));
    let indexed = doc.add(Object::Array(vec![
        Object::name("Indexed"),
        Object::Reference(separation),
        Object::Integer(3),
        Object::String(vec![0, 64, 128, 255]),
    ]));
    let descriptor = Descriptor::new(Object::Reference(indexed));

    let mut session = ModelSession::new(&doc);
    let first = session.color_space(Some(&descriptor)).unwrap();
    let ColorSpace::Indexed(top) = first.as_ref() else {
        panic!("Expected Indexed, got {}", first.family());
    };
    assert_eq!(top.hival, Some(3));
    assert_eq!(top.lookup_len, Some(4));

    let base = top.base.as_ref().unwrap();
    let ColorSpace::Separation(sep) = base.as_ref() else {
        panic!("Expected Separation base, got {}", base.family());
    };
    assert_eq!(sep.colorant_name.as_deref(), Some("PANTONE 300 C"));
    assert!(Arc::ptr_eq(sep.alternate.as_ref().unwrap(), &ColorSpace::device_cmyk(false)));

    // The nested Separation was cached under its own reference
    let direct = session.color_space(Some(&Descriptor::new(Object::Reference(separation)))).unwrap();
    assert!(Arc::ptr_eq(&direct, base));

    let second = session.color_space(Some(&descriptor)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_unknown_family_is_absent() {
    init_logging();
    let mut doc = CosDocument::new();
    let foo = doc.add(Object::Array(vec![Object::name("FooSpace"), dict(vec![])]));

    let mut session = ModelSession::new(&doc);
    assert!(session.color_space(Some(&Descriptor::new(Object::name("FooSpace")))).is_none());
    assert!(session.color_space(Some(&Descriptor::new(Object::Reference(foo)))).is_none());
    assert!(session.color_space(Some(&Descriptor::new(Object::Integer(4)))).is_none());
    assert!(session.color_space(None).is_none());
}

#[test]
fn test_mutually_referencing_alternates_terminate() {
    init_logging();
    let mut doc = CosDocument::new();
    let a = ObjectRef::new(1, 0);
    let b = ObjectRef::new(2, 0);
    doc.insert(
        a,
        Object::Array(vec![Object::name("Separation"), Object::name("A"), Object::Reference(b), Object::Null]),
    );
    doc.insert(
        b,
        Object::Array(vec![Object::name("Separation"), Object::name("B"), Object::Reference(a), Object::Null]),
    );

    let mut session = ModelSession::new(&doc);
    let resolved = session.color_space(Some(&Descriptor::new(Object::Reference(a)))).unwrap();
    let ColorSpace::Separation(outer) = resolved.as_ref() else {
        panic!("Expected Separation");
    };
    let inner = outer.alternate.as_ref().unwrap();
    let ColorSpace::Separation(inner) = inner.as_ref() else {
        panic!("Expected Separation alternate");
    };
    assert!(inner.alternate.is_none());
    assert!(!inner.has_tint_transform);
}

/// Whether the Separation at `r` resolves with an alternate space.
fn has_alternate(session: &mut ModelSession<'_, CosDocument>, r: ObjectRef) -> bool {
    match session.color_space(Some(&Descriptor::new(Object::Reference(r)))).as_deref() {
        Some(ColorSpace::Separation(sep)) => sep.alternate.is_some(),
        other => panic!("Expected Separation, got {:?}", other.map(|cs| cs.family())),
    }
}

#[test]
fn test_cycle_cut_does_not_depend_on_resolution_order() {
    init_logging();
    let mut doc = CosDocument::new();
    let a = ObjectRef::new(1, 0);
    let b = ObjectRef::new(2, 0);
    doc.insert(
        a,
        Object::Array(vec![Object::name("Separation"), Object::name("A"), Object::Reference(b), Object::Null]),
    );
    doc.insert(
        b,
        Object::Array(vec![Object::name("Separation"), Object::name("B"), Object::Reference(a), Object::Null]),
    );

    let fresh = has_alternate(&mut ModelSession::new(&doc), b);
    assert!(fresh);

    let mut session = ModelSession::new(&doc);
    assert!(has_alternate(&mut session, a));
    assert_eq!(has_alternate(&mut session, b), fresh);
    assert!(!session.cache().contains(a));
    assert!(!session.cache().contains(b));
}

#[test]
fn test_named_lookup_through_scope() {
    let mut doc = CosDocument::new();
    let lab = doc.add(Object::Array(vec![Object::name("Lab"), dict(vec![])]));
    let page = InheritableResources::EMPTY.extend(dict(vec![(
        "ColorSpace",
        dict(vec![("CS1", Object::Reference(lab))]),
    )]));

    let mut session = ModelSession::new(&doc);
    let resolved = session.named_color_space(&page, "CS1").unwrap();
    assert_eq!(resolved.family(), ColorSpaceFamily::Lab);
    assert!(session.cache().contains(lab));
    assert!(session.named_color_space(&page, "CS2").is_none());
}
