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

/// Marker comment of every placed page on each destination page, in draw order
fn placed_markers(output: &Document) -> Vec<Vec<String>> {
    output
        .get_pages()
        .values()
        .map(|&page_id| {
            let page = output.get_dictionary(page_id).unwrap();
            let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
            let content = output.get_object(content_id).unwrap().as_stream().unwrap();
            let ops = String::from_utf8(content.content.clone()).unwrap();

            let xobjects = page
                .get(b"Resources")
                .and_then(|r| r.as_dict())
                .and_then(|r| r.get(b"XObject"))
                .and_then(|x| x.as_dict())
                .unwrap();

            let tokens: Vec<&str> = ops.split_whitespace().collect();
            tokens
                .windows(2)
                .filter(|pair| pair[1] == "Do")
                .map(|pair| {
                    let name = pair[0].trim_start_matches('/');
                    let id = xobjects.get(name.as_bytes()).unwrap().as_reference().unwrap();
                    let xobject = output.get_object(id).unwrap().as_stream().unwrap();
                    let text = String::from_utf8(xobject.content.clone()).unwrap();
                    text.lines().next().unwrap().to_string()
                })
                .collect()
        })
        .collect()
}

fn marker(doc: usize, page: usize) -> String {
    format!("% doc {} page {}", doc, page)
}

#[test]
fn test_two_up_two_single_page_documents() {
    let a = create_test_pdf(0, &[(200, 300)]);
    let b = create_test_pdf(1, &[(200, 300)]);
    let pages = collect(&[a, b]).unwrap();

    let plan = plan_imposition(&pages.dimensions(), LayoutMode::TwoUp).unwrap();
    assert_eq!(plan.page_count(), 1);

    let sheet = &plan.sheets[0];
    assert_eq!(sheet.placements.len(), 2);
    let top = &sheet.placements[0];
    let bottom = &sheet.placements[1];
    assert_eq!(top.cell_index, 0);
    assert_eq!(bottom.cell_index, 1);
    assert!(top.content_rect.y > bottom.content_rect.top());
    assert!(!top.content_rect.overlaps(&bottom.content_rect));

    let a4 = Rect::new(0.0, 0.0, 595.28, 841.89);
    assert!(a4.contains(&top.content_rect, 0.001));
    assert!(a4.contains(&bottom.content_rect, 0.001));

    let output = impose(&pages, LayoutMode::TwoUp).unwrap();
    assert_eq!(output.get_pages().len(), 1);
    assert_eq!(
        placed_markers(&output),
        vec![vec![marker(0, 0), marker(1, 0)]]
    );
}

#[test]
fn test_eight_up_nine_pages() {
    let doc = create_test_pdf(0, &[(960, 540); 9]);
    let pages = collect(&[doc]).unwrap();

    let plan = plan_imposition(&pages.dimensions(), LayoutMode::EightUp).unwrap();
    assert_eq!(plan.page_count(), 2);
    let cells: Vec<usize> = plan.sheets[0]
        .placements
        .iter()
        .map(|p| p.cell_index)
        .collect();
    assert_eq!(cells, (0..8).collect::<Vec<_>>());
    assert_eq!(plan.sheets[1].placements.len(), 1);
    assert_eq!(plan.sheets[1].placements[0].cell_index, 0);

    let output = impose(&pages, LayoutMode::EightUp).unwrap();
    let markers = placed_markers(&output);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].len(), 8);
    assert_eq!(markers[1], vec![marker(0, 8)]);
}

#[test]
fn test_output_page_count_matches_groups() {
    for mode in LayoutMode::ALL {
        let n = mode.pages_per_sheet();
        for total in 1..=20 {
            let doc = create_test_pdf(0, &vec![(612, 792); total]);
            let pages = collect(&[doc]).unwrap();

            let plan = plan_imposition(&pages.dimensions(), mode).unwrap();
            assert_eq!(plan.page_count(), total.div_ceil(n), "{mode} with {total} pages");

            for (index, sheet) in plan.sheets.iter().enumerate() {
                let expected = if index + 1 < plan.page_count() || total % n == 0 {
                    n
                } else {
                    total % n
                };
                assert_eq!(sheet.placements.len(), expected);
            }

            let output = impose(&pages, mode).unwrap();
            assert_eq!(output.get_pages().len(), total.div_ceil(n));
        }
    }
}

#[test]
fn test_placements_fit_cells_and_keep_aspect() {
    let sizes = [(200, 300), (960, 540), (612, 792), (1000, 10), (10, 1000), (842, 595)];
    let doc = create_test_pdf(0, &sizes);
    let pages = collect(&[doc]).unwrap();

    for mode in LayoutMode::ALL {
        let plan = plan_imposition(&pages.dimensions(), mode).unwrap();
        for placement in plan.placements() {
            let (w, h) = sizes[placement.source_index];
            let rect = placement.content_rect;

            assert!(rect.width <= placement.cell.width);
            assert!(rect.height <= placement.cell.height);
            assert!(placement.cell.contains(&rect, 0.001));

            let source_ratio = w as f32 / h as f32;
            let placed_ratio = rect.width / rect.height;
            assert!((placed_ratio - source_ratio).abs() / source_ratio < 1e-4);

            // Centered in the cell
            assert!((rect.center_x() - placement.cell.center_x()).abs() < 0.01);
            assert!((rect.center_y() - placement.cell.center_y()).abs() < 0.01);
        }
    }
}

#[test]
fn test_order_preserved_across_documents() {
    let a = create_test_pdf(0, &[(200, 300); 3]);
    let b = create_test_pdf(1, &[(960, 540); 4]);
    let c = create_test_pdf(2, &[(612, 792); 2]);
    let pages = collect(&[a, b, c]).unwrap();

    let expected: Vec<String> = [(0, 3), (1, 4), (2, 2)]
        .iter()
        .flat_map(|&(doc, count)| (0..count).map(move |page| marker(doc, page)))
        .collect();

    for mode in LayoutMode::ALL {
        let output = impose(&pages, mode).unwrap();
        let flattened: Vec<String> = placed_markers(&output).into_iter().flatten().collect();
        assert_eq!(flattened, expected, "{mode}");

        let plan = plan_imposition(&pages.dimensions(), mode).unwrap();
        let indices: Vec<usize> = plan.placements().map(|p| p.source_index).collect();
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
    }
}

#[test]
fn test_geometry_is_idempotent() {
    let doc = create_test_pdf(0, &[(200, 300), (960, 540), (612, 792)]);
    let pages = collect(&[doc]).unwrap();

    for mode in LayoutMode::ALL {
        let first = plan_imposition(&pages.dimensions(), mode).unwrap();
        let second = plan_imposition(&pages.dimensions(), mode).unwrap();
        assert_eq!(first, second);

        let a = to_bytes(impose(&pages, mode).unwrap(), false).unwrap();
        let b = to_bytes(impose(&pages, mode).unwrap(), false).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_degenerate_page_aborts_with_draw_error() {
    let doc = create_test_pdf(0, &[(200, 300), (0, 300), (200, 300)]);
    let pages = collect(&[doc]).unwrap();

    match impose(&pages, LayoutMode::TwoUp) {
        Err(ImposeError::Draw { page, .. }) => assert_eq!(page, 1),
        Err(e) => panic!("Expected Draw error, got {e}"),
        Ok(_) => panic!("Expected Draw error, got a document"),
    }
}

#[test]
fn test_shared_resources_copied_once() {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let mut kids = Vec::new();
    for _ in 0..4 {
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"BT /F1 12 Tf (x) Tj ET".to_vec(),
        ));
        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]);
        kids.push(Object::Reference(doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]))));
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(4)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(960),
                    Object::Integer(540),
                ]),
            ),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let pages = collect_documents(vec![doc]).unwrap();
    assert_eq!(pages.get(0).unwrap().width(), 960.0);

    let output = impose(&pages, LayoutMode::TwoUp).unwrap();
    let fonts = output
        .objects
        .values()
        .filter(|obj| {
            obj.as_dict()
                .and_then(|d| d.get(b"Type"))
                .and_then(|t| t.as_name())
                .map(|name| name == b"Font")
                .unwrap_or(false)
        })
        .count();
    assert_eq!(fonts, 1);
}

#[test]
fn test_serialized_output_reloads() {
    let a = create_test_pdf(0, &[(200, 300); 5]);
    let pages = collect(&[a]).unwrap();

    for compress in [false, true] {
        let bytes = to_bytes(impose(&pages, LayoutMode::TwoUp).unwrap(), compress).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 3);

        // The imposed output is itself valid input
        let again = collect(&[bytes]).unwrap();
        assert_eq!(again.len(), 3);
        let page = again.get(0).unwrap();
        assert!((page.width() - 595.28).abs() < 0.01);
        assert!((page.height() - 841.89).abs() < 0.01);
    }
}

#[tokio::test]
async fn test_combine_async() {
    let a = create_test_pdf(0, &[(960, 540); 10]);
    let b = create_test_pdf(1, &[(960, 540); 7]);

    let output = combine(vec![a, b], LayoutMode::EightUp).await.unwrap();
    assert_eq!(output.get_pages().len(), 3);
}

#[tokio::test]
async fn test_combine_async_reports_parse_error() {
    let a = create_test_pdf(0, &[(960, 540)]);

    let result = combine(vec![a, b"nope".to_vec()], LayoutMode::TwoUp).await;
    assert!(matches!(result, Err(ImposeError::Parse { index: 1, .. })));
}

#[tokio::test]
async fn test_combine_async_empty() {
    let result = combine(Vec::new(), LayoutMode::TwoUp).await;
    assert!(matches!(result, Err(ImposeError::EmptyInput)));
}

#[tokio::test]
async fn test_load_pages_and_save_pdf() {
    use tempfile::NamedTempFile;

    let first = NamedTempFile::new().unwrap();
    let second = NamedTempFile::new().unwrap();
    std::fs::write(first.path(), create_test_pdf(0, &[(200, 300); 3])).unwrap();
    std::fs::write(second.path(), create_test_pdf(1, &[(200, 300); 2])).unwrap();

    let pages = load_pages(&[first.path(), second.path()]).await.unwrap();
    assert_eq!(pages.len(), 5);

    let output = impose_pages(pages, LayoutMode::TwoUp).await.unwrap();
    let target = NamedTempFile::new().unwrap();
    save_pdf(output, target.path(), true).await.unwrap();

    let loaded = Document::load(target.path()).unwrap();
    assert_eq!(loaded.get_pages().len(), 3);
}

#[tokio::test]
async fn test_load_pages_reports_bad_file_position() {
    use tempfile::NamedTempFile;

    let good = NamedTempFile::new().unwrap();
    let bad = NamedTempFile::new().unwrap();
    std::fs::write(good.path(), create_test_pdf(0, &[(200, 300)])).unwrap();
    std::fs::write(bad.path(), b"plain text").unwrap();

    let result = load_pages(&[good.path(), good.path(), bad.path()]).await;
    assert!(matches!(result, Err(ImposeError::Parse { index: 2, .. })));
}
