use lopdf::{Dictionary, Document, Object, Stream};
use pdf_nup::*;

fn create_test_pdf(tag: usize, sizes: &[(i64, i64)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for (page, &(width, height)) in sizes.iter().enumerate() {
        let content = format!("% doc {} page {}\nq Q", tag, page);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // Create pages dict
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

#[test]
fn test_statistics_two_up_odd_pages() {
    let a = create_test_pdf(0, &[(960, 540); 3]);
    let b = create_test_pdf(1, &[(960, 540); 2]);
    let pages = collect(&[a, b]).unwrap();

    let stats = calculate_statistics(&pages, LayoutMode::TwoUp).unwrap();
    assert_eq!(stats.source_pages, 5);
    assert_eq!(stats.pages_per_document, vec![3, 2]);
    assert_eq!(stats.pages_per_sheet, 2);
    assert_eq!(stats.output_pages, 3);
    assert_eq!(stats.empty_cells, 1);
}

#[test]
fn test_statistics_eight_up_exact_multiple() {
    let doc = create_test_pdf(0, &[(960, 540); 16]);
    let pages = collect(&[doc]).unwrap();

    let stats = calculate_statistics(&pages, LayoutMode::EightUp).unwrap();
    assert_eq!(stats.output_pages, 2);
    assert_eq!(stats.empty_cells, 0);
}

#[test]
fn test_statistics_match_imposed_output() {
    for total in [1, 7, 8, 9, 15] {
        let doc = create_test_pdf(0, &vec![(612, 792); total]);
        let pages = collect(&[doc]).unwrap();

        for mode in LayoutMode::ALL {
            let stats = calculate_statistics(&pages, mode).unwrap();
            let output = impose(&pages, mode).unwrap();
            assert_eq!(stats.output_pages, output.get_pages().len());

            let placed = plan_imposition(&pages.dimensions(), mode)
                .unwrap()
                .placements()
                .count();
            assert_eq!(placed + stats.empty_cells, stats.output_pages * stats.pages_per_sheet);
        }
    }
}
