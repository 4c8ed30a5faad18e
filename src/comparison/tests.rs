use serde_json::json;

use super::*;
use crate::config::{ComparisonConfig, HighlightTags, ImageFieldConfig, RowLayoutConfig};

fn matcher() -> ImageFieldMatcher {
    ImageFieldMatcher::from_config(&ImageFieldConfig::default())
        .expect("default image patterns should compile")
}

fn items(value: serde_json::Value) -> Vec<ResultItem> {
    items_from_json(&value).expect("test input should be an array")
}

fn ranked(ids: &[(&str, usize)]) -> Vec<ResultItem> {
    items(serde_json::Value::Array(
        ids.iter()
            .map(|(id, rank)| json!({ "_id": id, "rank": rank }))
            .collect(),
    ))
}

#[test]
fn statistics_for_partially_overlapping_lists() {
    let result_a = ranked(&[("1", 1), ("2", 2)]);
    let result_b = ranked(&[("1", 2), ("3", 1)]);

    let statistics = compute_statistics(&result_a, &result_b);
    assert_eq!(statistics.in_both, 1);
    assert_eq!(statistics.only_in_result1, 1);
    assert_eq!(statistics.only_in_result2, 1);
    assert_eq!(statistics.unchanged, 0);
    assert_eq!(statistics.improved + statistics.worsened, 1);
    assert_eq!(statistics.worsened, 1, "rank 1 in A and 2 in B is a drop");

    let index_a = RankIndex::new(&result_a);
    let index_b = RankIndex::new(&result_b);
    let statuses_a = item_statuses(ListSide::A, &result_a, &index_b);
    let statuses_b = item_statuses(ListSide::B, &result_b, &index_a);
    assert_eq!(statuses_a[0].status, MatchStatus::Decreased);
    assert_eq!(statuses_a[1].status, MatchStatus::OnlyInA);
    assert_eq!(statuses_b[0].status, MatchStatus::Decreased);
    assert_eq!(statuses_b[1].status, MatchStatus::OnlyInB);
}

#[test]
fn disjoint_lists_share_nothing() {
    let result_a = ranked(&[("a", 1), ("b", 2), ("c", 3)]);
    let result_b = ranked(&[("x", 1), ("y", 2)]);

    let statistics = compute_statistics(&result_a, &result_b);
    assert_eq!(statistics.in_both, 0);
    assert_eq!(statistics.only_in_result1, 3);
    assert_eq!(statistics.only_in_result2, 2);
    assert_eq!(statistics.unchanged + statistics.improved + statistics.worsened, 0);
}

#[test]
fn identical_lists_are_all_unchanged() {
    let result_a = ranked(&[("a", 1), ("b", 2), ("c", 3)]);
    let result_b = result_a.clone();

    let statistics = compute_statistics(&result_a, &result_b);
    assert_eq!(statistics.in_both, 3);
    assert_eq!(statistics.unchanged, 3);
    assert_eq!(statistics.improved, 0);
    assert_eq!(statistics.worsened, 0);

    let index_b = RankIndex::new(&result_b);
    assert!(
        item_statuses(ListSide::A, &result_a, &index_b)
            .iter()
            .all(|status| status.status == MatchStatus::Unchanged)
    );
}

#[test]
fn perspective_of_list_b_is_mirrored() {
    assert_eq!(classify(ListSide::A, 3, Some(1)), MatchStatus::Increased);
    assert_eq!(classify(ListSide::A, 1, Some(3)), MatchStatus::Decreased);
    assert_eq!(classify(ListSide::B, 1, Some(3)), MatchStatus::Increased);
    assert_eq!(classify(ListSide::B, 3, Some(1)), MatchStatus::Decreased);
    assert_eq!(classify(ListSide::B, 2, Some(2)), MatchStatus::Unchanged);
    assert_eq!(classify(ListSide::A, 2, None), MatchStatus::OnlyInA);
    assert_eq!(classify(ListSide::B, 2, None), MatchStatus::OnlyInB);
}

#[test]
fn improved_items_match_increased_status() {
    let result_a = ranked(&[("a", 1), ("b", 2), ("c", 3)]);
    let result_b = ranked(&[("c", 1), ("a", 2), ("b", 3)]);

    let statistics = compute_statistics(&result_a, &result_b);
    assert_eq!(statistics.improved, 1);
    assert_eq!(statistics.worsened, 2);

    let index_b = RankIndex::new(&result_b);
    let increased = item_statuses(ListSide::A, &result_a, &index_b)
        .into_iter()
        .filter(|status| status.status == MatchStatus::Increased)
        .map(|status| status.id)
        .collect::<Vec<_>>();
    assert_eq!(increased, vec!["c".to_string()]);
}

#[test]
fn items_are_built_from_flat_objects_and_search_hits() {
    let parsed = items(json!([
        { "_id": "a", "rank": 4, "title": "Alpha", "price": 9.5 },
        { "_id": 17, "_score": 1.2, "_source": { "title": "Beta" }, "highlight": { "title": ["<em>Beta</em>"] } },
        { "title": "no id" },
        "not an object",
        { "_id": "c" }
    ]));

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0].rank, 4);
    assert_eq!(parsed[0].display_value("price"), "9.5");
    assert_eq!(parsed[1].id, "17");
    assert_eq!(parsed[1].rank, 2);
    assert_eq!(parsed[1].display_value("title"), "<em>Beta</em>");
    assert_eq!(parsed[1].document.get("_score"), Some(&FieldValue::Number(1.2)));
    assert_eq!(parsed[2].rank, 5);
    assert_eq!(parsed[2].display_value("title"), "");
    assert_eq!(parsed[2].display_value(ID_FIELD), "c");

    assert!(items_from_json(&json!({ "_id": "a" })).is_none());
}

#[test]
fn fractional_or_invalid_ranks_fall_back_to_position() {
    let parsed = items(json!([
        { "_id": "a", "rank": 2.7 },
        { "_id": "b", "rank": 0 },
        { "_id": "c", "rank": "3" },
        { "_id": "d", "rank": 7.0 }
    ]));

    let ranks = parsed.iter().map(|item| item.rank).collect::<Vec<_>>();
    assert_eq!(ranks, vec![1, 2, 3, 7]);
}

#[test]
fn display_fields_come_from_string_fields_of_first_sample() {
    let result_a = items(json!([]));
    let result_b = items(json!([
        { "_id": "1", "title": "Shoe", "_index": "products", "price": 10, "brand": "Acme", "tags": ["x"] },
        { "_id": "2", "description": "ignored, not the sample" }
    ]));

    let fields = discover_display_fields(sample_item(&result_a, &result_b));
    let values = fields
        .iter()
        .map(|field| field.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(values, vec![ID_FIELD, "title", "brand"]);
    assert_eq!(fields[0].label, "ID");

    assert_eq!(discover_display_fields(None).len(), 1);
}

#[test]
fn image_field_prefers_keyword_then_extension_then_url() {
    let matcher = matcher();

    let by_keyword = items(json!([{
        "_id": "1",
        "link": "https://example.com/a.png",
        "thumbnailUrl": "https://cdn.example.com/t/1"
    }]));
    assert_eq!(matcher.detect(&by_keyword[0]).as_deref(), Some("thumbnailUrl"));

    let by_extension = items(json!([{
        "_id": "1",
        "title": "Red shoe",
        "asset": "https://example.com/products/1.JPG?w=200"
    }]));
    assert_eq!(matcher.detect(&by_extension[0]).as_deref(), Some("asset"));

    let by_url = items(json!([{
        "_id": "1",
        "title": "Red shoe",
        "asset": "https://images.example.com/abc123"
    }]));
    assert_eq!(matcher.detect(&by_url[0]).as_deref(), Some("asset"));

    let none = items(json!([{ "_id": "1", "title": "Red shoe", "_image": "x.png" }]));
    assert_eq!(matcher.detect(&none[0]), None);
}

#[test]
fn image_keywords_match_whole_words_of_field_names() {
    let matcher = matcher();

    let sample = items(json!([{
        "_id": "1",
        "discovered_by": "alice",
        "coverage": "full",
        "recoveryCode": "r1",
        "photo": "https://example.com/a"
    }]));
    assert_eq!(matcher.detect(&sample[0]).as_deref(), Some("photo"));

    let plural = items(json!([{ "_id": "1", "summary": "x", "product-images": "a;b" }]));
    assert_eq!(matcher.detect(&plural[0]).as_deref(), Some("product-images"));

    let numbered = items(json!([{ "_id": "1", "img2": "n/a" }]));
    assert_eq!(matcher.detect(&numbered[0]).as_deref(), Some("img2"));

    let unrelated = items(json!([{ "_id": "1", "discovered_by": "alice" }]));
    assert_eq!(matcher.detect(&unrelated[0]), None);
}

#[test]
fn image_keywords_are_configurable() {
    let config = ImageFieldConfig {
        keywords: vec!["artwork".to_string()],
        ..ImageFieldConfig::default()
    };
    let matcher = ImageFieldMatcher::from_config(&config).expect("patterns should compile");

    let sample = items(json!([{ "_id": "1", "image": "n/a", "albumArtwork": "n/a" }]));
    assert_eq!(matcher.detect(&sample[0]).as_deref(), Some("albumArtwork"));

    let broken = ImageFieldConfig {
        extension_pattern: "(".to_string(),
        ..ImageFieldConfig::default()
    };
    assert!(ImageFieldMatcher::from_config(&broken).is_err());
}

struct FlakyGeometry {
    mounted: bool,
}

impl ItemGeometry for FlakyGeometry {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn container(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            top: 100.0,
            left: 0.0,
            width: 50.0,
            height: 500.0,
        })
    }

    fn bounding_box(&self, side: ListSide, id: &str) -> Option<BoundingBox> {
        if id == "ghost" {
            return None;
        }
        let top = match side {
            ListSide::A => 110.0,
            ListSide::B => 150.0,
        };
        Some(BoundingBox {
            top,
            left: 0.0,
            width: 10.0,
            height: 20.0,
        })
    }
}

#[test]
fn connectors_skip_unmatched_and_unmeasurable_items() {
    let result_a = ranked(&[("a", 1), ("ghost", 2), ("solo", 3)]);
    let result_b = ranked(&[("ghost", 1), ("a", 2)]);

    let lines = connector_lines(&result_a, &result_b, &FlakyGeometry { mounted: true });
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line.id, "a");
    assert_eq!(line.x1_percent, 0.0);
    assert_eq!(line.x2_percent, 100.0);
    assert_eq!(line.y1, 20.0);
    assert_eq!(line.y2, 60.0);
    assert_eq!(line.status, MatchStatus::Decreased);
    assert_eq!(line.color, MatchStatus::Decreased.color());

    let unmounted = connector_lines(&result_a, &result_b, &FlakyGeometry { mounted: false });
    assert!(unmounted.is_empty());
}

#[test]
fn row_layout_places_connectors_at_row_centers() {
    let result_a = ranked(&[("a", 1), ("b", 2)]);
    let result_b = ranked(&[("b", 1), ("a", 2)]);
    let layout = RowLayout::new(
        RowLayoutConfig {
            row_height: 40.0,
            header_offset: 10.0,
        },
        &result_a,
        &result_b,
    );

    let lines = connector_lines(&result_a, &result_b, &layout);
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].y1, lines[0].y2), (30.0, 70.0));
    assert_eq!((lines[1].y1, lines[1].y2), (70.0, 30.0));
    assert_eq!(lines[1].status, MatchStatus::Increased);
}

#[test]
fn highlight_toggles_on_tag_boundaries() {
    let tags = HighlightTags::default();

    let segments = highlight_segments("red <em>running</em> shoes &lt;em&gt;sale&lt;/em&gt;", &tags);
    assert_eq!(
        segments,
        vec![
            HighlightSegment {
                text: "red ".to_string(),
                highlighted: false,
            },
            HighlightSegment {
                text: "running".to_string(),
                highlighted: true,
            },
            HighlightSegment {
                text: " shoes ".to_string(),
                highlighted: false,
            },
            HighlightSegment {
                text: "sale".to_string(),
                highlighted: true,
            },
        ]
    );
    assert_eq!(render_marked(&segments), "red [running] shoes [sale]");

    let repeated = highlight_segments("<em>a<em>b</em>c</em>", &tags);
    assert_eq!(render_marked(&repeated), "[a]b[c]");
    assert_eq!(repeated.len(), 3);
}

#[test]
fn highlight_without_tags_or_with_broken_tags_is_plain() {
    let tags = HighlightTags::default();

    assert_eq!(render_marked(&highlight_segments("plain text", &tags)), "plain text");
    assert_eq!(render_marked(&highlight_segments("a <em>open", &tags)), "a open");
    assert_eq!(render_marked(&highlight_segments("a</em> b", &tags)), "a b");
    assert!(highlight_segments("", &tags).is_empty());

    let custom = HighlightTags {
        pre_tags: vec!["**".to_string()],
        post_tags: vec!["__".to_string()],
    };
    assert_eq!(render_marked(&highlight_segments("x **y__ z", &custom)), "x [y] z");
}

#[test]
fn view_is_initial_until_both_inputs_are_arrays() {
    let matcher = matcher();

    let view = ComparisonView::evaluate(&json!(null), &json!([]), &matcher);
    assert!(!view.is_ready());

    let view = ComparisonView::evaluate(&json!([]), &json!([]), &matcher);
    let snapshot = view.snapshot().expect("two arrays should be ready");
    assert_eq!(snapshot.statistics, ComparisonStatistics::default());
    assert_eq!(snapshot.display_fields.len(), 1);
    assert!(snapshot.image_field.is_none());
}

#[test]
fn session_recomputes_and_resets_stale_selection() {
    let config = ComparisonConfig::default();
    let matcher = ImageFieldMatcher::from_config(&config.image_field).expect("patterns compile");
    let mut session = ComparisonSession::new(matcher);

    let first = json!([{ "_id": "1", "title": "Shoe", "image": "https://example.com/1.png" }]);
    let second = json!([{ "_id": "1", "rank": 2, "title": "Shoe" }]);
    session.update(&first, &second);
    assert!(session.select_field("title"));
    assert!(!session.select_field("missing"));
    assert_eq!(session.selected_field(), "title");
    let snapshot = session.view().snapshot().expect("ready");
    assert_eq!(snapshot.image_field.as_deref(), Some("image"));
    assert_eq!(snapshot.statistics.worsened, 1);

    session.update(&json!([{ "_id": "9", "name": "Other" }]), &second);
    assert_eq!(session.selected_field(), ID_FIELD);
    let snapshot = session.view().snapshot().expect("ready");
    assert!(snapshot.image_field.is_none());
    assert_eq!(snapshot.statistics.in_both, 0);

    session.update(&json!("oops"), &second);
    assert!(!session.view().is_ready());
    assert_eq!(session.selected_field(), ID_FIELD);
}

#[test]
fn item_detail_reports_both_perspectives() {
    let view = ComparisonView::evaluate(
        &json!([{ "_id": "a", "title": "Alpha" }, { "_id": "b", "title": "Beta" }]),
        &json!([{ "_id": "b", "title": "Beta" }]),
        &matcher(),
    );
    let snapshot = view.snapshot().expect("ready");

    let detail = snapshot.item_detail("b").expect("b exists");
    assert_eq!(detail.rank_a, Some(2));
    assert_eq!(detail.rank_b, Some(1));
    assert_eq!(detail.status_a, Some(MatchStatus::Increased));
    assert_eq!(detail.status_b, Some(MatchStatus::Increased));
    assert_eq!(
        detail.fields,
        vec![
            ("ID".to_string(), "b".to_string()),
            ("title".to_string(), "Beta".to_string()),
        ]
    );

    let only_a = snapshot.item_detail("a").expect("a exists");
    assert_eq!(only_a.status_a, Some(MatchStatus::OnlyInA));
    assert_eq!(only_a.status_b, None);
    assert!(snapshot.item_detail("zzz").is_none());
}

#[test]
fn legend_lists_every_status_once() {
    let entries = legend();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[3].class, "onlyInA");
    let value = serde_json::to_value(&entries[4]).expect("legend entry should serialize");
    assert_eq!(value["status"], "onlyInB");
}
