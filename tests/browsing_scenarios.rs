//! End-to-end browsing scenarios: JSON catalog -> library -> coordinator.

use std::sync::Arc;

use book_browser::state::{
    apply_instructions, filter_catalog, load_catalog, Book, Catalog, FilterCriteria, PageSize,
    RenderCoordinator, RenderInstruction, RenderSurface, ALL,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Plain record of what a display would show
#[derive(Debug, Default)]
struct Screen {
    titles: Vec<String>,
    indices: Vec<usize>,
    load_more_enabled: bool,
    label: String,
    empty_message: bool,
}

impl RenderSurface for Screen {
    fn clear(&mut self) {
        self.titles.clear();
        self.indices.clear();
    }

    fn append_preview(&mut self, book: &Book, original_index: usize) {
        self.titles.push(book.title.clone());
        self.indices.push(original_index);
    }

    fn set_load_more_enabled(&mut self, enabled: bool) {
        self.load_more_enabled = enabled;
    }

    fn set_remaining(&mut self, remaining: usize) {
        self.label = format!("({})", remaining);
    }

    fn set_empty_message_visible(&mut self, visible: bool) {
        self.empty_message = visible;
    }
}

fn catalog_json(count: usize) -> serde_json::Value {
    let books: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("id-{:03}", i),
                "image": format!("https://covers.example/{}.jpg", i),
                "title": if i % 3 == 0 { format!("The Sea {}", i) } else { format!("Mountain {}", i) },
                "author": if i % 2 == 0 { "author-a" } else { "author-b" },
                "description": "A book.",
                "published": "2010-05-17T00:00:00.000Z",
                "genres": if i % 5 == 0 { vec!["poetry", "travel"] } else { vec!["travel"] },
            })
        })
        .collect();

    json!({
        "books": books,
        "authors": { "author-a": "Ada", "author-b": "Basil" },
        "genres": { "poetry": "Poetry", "travel": "Travel" },
    })
}

fn write_catalog(dir: &tempfile::TempDir, count: usize) -> std::path::PathBuf {
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, catalog_json(count).to_string()).unwrap();
    path
}

fn browse(catalog: &Arc<Catalog>) -> (RenderCoordinator, Screen) {
    let mut coordinator = RenderCoordinator::new(PageSize::default());
    let mut screen = Screen::default();
    let out = coordinator.initialize(catalog.clone());
    apply_instructions(catalog, &out, &mut screen);
    (coordinator, screen)
}

#[test]
fn hundred_books_reveal_page_by_page() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_catalog(&dir, 100);
    let db = dir.path().join("library.db");
    let catalog = Arc::new(load_catalog(Some(source.as_path()), Some(db.as_path())).unwrap());

    let (mut coordinator, mut screen) = browse(&catalog);
    assert_eq!(screen.indices, (0..36).collect::<Vec<_>>());
    assert_eq!(screen.label, "(64)");
    assert!(screen.load_more_enabled);

    let out = coordinator.load_more();
    apply_instructions(&catalog, &out, &mut screen);
    assert_eq!(screen.indices, (0..72).collect::<Vec<_>>());
    assert_eq!(screen.label, "(28)");
    assert!(screen.load_more_enabled);

    let out = coordinator.load_more();
    apply_instructions(&catalog, &out, &mut screen);
    assert_eq!(screen.indices, (0..100).collect::<Vec<_>>());
    assert_eq!(screen.label, "(0)");
    assert!(!screen.load_more_enabled);
}

#[test]
fn stored_library_serves_the_same_catalog_without_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_catalog(&dir, 12);
    let db = dir.path().join("library.db");

    let imported = load_catalog(Some(source.as_path()), Some(db.as_path())).unwrap();
    let reloaded = load_catalog(None, Some(db.as_path())).unwrap();
    assert_eq!(imported, reloaded);
    assert_eq!(reloaded.get(3).unwrap().id, "id-003");
}

#[test]
fn ten_books_fit_on_one_page() {
    let catalog = Arc::new(Catalog::from_json_str(&catalog_json(10).to_string()).unwrap());
    let (_, screen) = browse(&catalog);

    assert_eq!(screen.indices, (0..10).collect::<Vec<_>>());
    assert_eq!(screen.titles[0], "The Sea 0");
    assert_eq!(screen.titles[1], "Mountain 1");
    assert!(!screen.load_more_enabled);
    assert_eq!(screen.label, "(0)");
    assert!(!screen.empty_message);
}

#[test]
fn filter_then_load_more_stays_on_filtered_set() {
    let catalog = Arc::new(Catalog::from_json_str(&catalog_json(200).to_string()).unwrap());
    let (mut coordinator, mut screen) = browse(&catalog);
    let out = coordinator.load_more();
    apply_instructions(&catalog, &out, &mut screen);
    assert_eq!(screen.indices.len(), 72);

    // Every even index belongs to author-a: 100 matches
    let criteria = FilterCriteria {
        title: String::new(),
        author: "author-a".to_string(),
        genre: ALL.to_string(),
    };
    let out = coordinator.apply_filter(&criteria);
    assert_eq!(out.last(), Some(&RenderInstruction::ScrollToTop));
    apply_instructions(&catalog, &out, &mut screen);

    let expected_first: Vec<usize> = (0..36).map(|i| i * 2).collect();
    assert_eq!(screen.indices, expected_first);
    assert_eq!(screen.label, "(64)");
    assert!(screen.load_more_enabled);

    let out = coordinator.load_more();
    apply_instructions(&catalog, &out, &mut screen);
    assert_eq!(screen.indices[36], 72);
    assert_eq!(screen.indices.len(), 72);
    assert!(screen.indices.iter().all(|i| i % 2 == 0));
    assert_eq!(screen.label, "(28)");
}

#[test]
fn combined_filters_preserve_catalog_order() {
    let catalog = Catalog::from_json_str(&catalog_json(30).to_string()).unwrap();
    let criteria = FilterCriteria {
        title: "the SEA".to_string(),
        author: ALL.to_string(),
        genre: "poetry".to_string(),
    };

    // Title matches every third book, poetry every fifth
    let result = filter_catalog(&catalog, &criteria);
    assert_eq!(result.indices(), &[0, 15]);
    assert_eq!(result, filter_catalog(&catalog, &criteria));
}

#[test]
fn no_matches_shows_empty_state() {
    let catalog = Arc::new(Catalog::from_json_str(&catalog_json(40).to_string()).unwrap());
    let (mut coordinator, mut screen) = browse(&catalog);

    let out = coordinator.apply_filter(&FilterCriteria {
        title: "desert".to_string(),
        ..FilterCriteria::default()
    });
    apply_instructions(&catalog, &out, &mut screen);

    assert!(screen.indices.is_empty());
    assert!(screen.empty_message);
    assert!(!screen.load_more_enabled);
    assert_eq!(screen.label, "(0)");

    // A later unrestricted search clears the message again
    let out = coordinator.apply_filter(&FilterCriteria::default());
    apply_instructions(&catalog, &out, &mut screen);
    assert!(!screen.empty_message);
    assert_eq!(screen.indices.len(), 36);
    assert_eq!(screen.label, "(4)");
}

#[test]
fn apple_and_banana_both_contain_a() {
    let json = json!({
        "books": [
            { "id": "1", "image": "", "title": "Apple", "author": "x", "description": "",
              "published": "2000-01-01T00:00:00Z", "genres": [] },
            { "id": "2", "image": "", "title": "Banana", "author": "x", "description": "",
              "published": "2000-01-01T00:00:00Z", "genres": [] }
        ],
        "authors": { "x": "X" },
        "genres": {}
    });
    let catalog = Catalog::from_json_str(&json.to_string()).unwrap();
    let criteria = FilterCriteria {
        title: "a".to_string(),
        author: ALL.to_string(),
        genre: ALL.to_string(),
    };

    let pairs: Vec<_> = filter_catalog(&catalog, &criteria)
        .entries(&catalog)
        .map(|(book, index)| (book.title.clone(), index))
        .collect();
    assert_eq!(pairs, vec![("Apple".to_string(), 0), ("Banana".to_string(), 1)]);
}

#[test]
fn bundled_demo_catalog_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/catalog.json");
    let catalog = Catalog::load_json(&path).unwrap();
    assert_eq!(catalog.len(), 5);

    let butler = filter_catalog(
        &catalog,
        &FilterCriteria {
            author: "butler".to_string(),
            ..FilterCriteria::default()
        },
    );
    assert_eq!(butler.indices(), &[2, 3]);
    assert_eq!(catalog.detail(2).unwrap().subtitle, "Octavia E. Butler (1979)");
}
