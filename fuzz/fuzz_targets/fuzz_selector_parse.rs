#![no_main]

use ptour::Selector;
use ptour_core::geometry::Rect;
use ptour_harness::PageElement;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 512 {
        return;
    }

    // Parsing must never panic; errors are fine.
    let Ok(selector) = Selector::parse(text) else {
        return;
    };

    // A parsed selector re-parses from its own source text.
    let again = Selector::parse(selector.as_str()).expect("source text re-parses");
    assert_eq!(again.tag(), selector.tag());
    assert_eq!(again.id(), selector.id());
    assert_eq!(again.classes(), selector.classes());

    // An element built from the selector's own parts matches it.
    let mut element = PageElement::new(selector.tag().unwrap_or("div"), Rect::default());
    if let Some(id) = selector.id() {
        element = element.with_id(id);
    }
    for class in selector.classes() {
        element = element.with_class(class.as_str());
    }
    for attr in selector.attributes() {
        if attr.name == "id" {
            continue;
        }
        element = element.with_attr(attr.name.as_str(), attr.value.clone().unwrap_or_default());
    }
    let _ = selector.matches(&element);
});
