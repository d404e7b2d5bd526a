// src/bin/catalog_bench.rs
// Measures the cost of the whole-file rewrite that follows every catalog mutation.
use bookshelf_api::{BookCatalog, BookFields, FallbackCatalog, JsonFileStore};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let num_items: usize = std::env::args()
        .nth(1)
        .map(|v| v.parse::<usize>())
        .transpose()?
        .unwrap_or(1_000);
    println!(
        "--- Catalog write benchmark: inserting {} books, rewriting the file each time ---",
        num_items
    );

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("books.json");
    let store = Arc::new(JsonFileStore::new(&path, FallbackCatalog::Empty));
    let mut catalog = BookCatalog::open(store).await;
    let mut rng = rand::thread_rng();

    let start_time = Instant::now();
    let mut last_insert = start_time.elapsed();
    for i in 0..num_items {
        let page_count = rng.gen_range(50..1_500);
        let fields = BookFields {
            name: format!("Book {}", i),
            year: rng.gen_range(1900..2025),
            author: format!("Author {}", rng.gen_range(0..100)),
            summary: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.".to_string(),
            publisher: format!("Publisher {}", rng.gen_range(0..20)),
            page_count,
            read_page: rng.gen_range(0..=page_count),
            reading: rng.gen_bool(0.5),
        };
        let before = Instant::now();
        catalog.insert(fields).await?;
        last_insert = before.elapsed();
    }

    let duration = start_time.elapsed();
    let file_size = std::fs::metadata(&path)?.len();

    println!("\n--- Results ---");
    println!("Final catalog file: {} bytes", file_size);
    println!("Total time: {} ms", duration.as_millis());
    println!(
        "Average time per insert: {:.2} µs",
        duration.as_micros() as f64 / num_items.max(1) as f64
    );
    println!("Last insert: {} µs", last_insert.as_micros());
    println!("\nEach insert rewrites the entire file, so cost grows linearly with catalog size.");
    Ok(())
}
