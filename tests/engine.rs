//! End-to-end scan and apply over JSON fixtures.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde::Serialize;

use retint::colour::{Adjustment, ColourKey};
use retint::engine::{apply, scan, ApplyOptions, ApplyRequest, ColourSource, HueOverrides, Metrics, ScanOptions};
use retint::protocol::{Session, UiMessage};
use retint::scene::{Attr, Document, Node, Paint};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn card() -> Document {
    Document::load(&fixtures_dir().join("card.json")).unwrap()
}

fn child<'a>(document: &'a Document, name: &str) -> &'a Node {
    document.selection[0]
        .children
        .as_ref()
        .unwrap()
        .iter()
        .find(|n| n.name == name)
        .unwrap()
}

fn hue(degrees: f64) -> ApplyRequest {
    ApplyRequest::new(Adjustment::new(0.0, 0.0, degrees), ApplyOptions::default())
}

/// The integer and string parts of a palette entry.
#[derive(Serialize)]
struct Swatch {
    key: String,
    hex: String,
    count: usize,
    sources: Vec<&'static str>,
}

fn swatches(document: &Document) -> Vec<Swatch> {
    scan(&document.selection, &ScanOptions::default())
        .palette
        .into_iter()
        .map(|entry| Swatch {
            key: entry.key.to_string(),
            hex: entry.hex,
            count: entry.count,
            sources: entry.sources.iter().map(|s| s.as_str()).collect(),
        })
        .collect()
}

#[test]
fn test_scan_card_palette() {
    insta::assert_json_snapshot!(swatches(&card()), @r###"
    [
      {
        "key": "255,0,0,255",
        "hex": "#FF0000",
        "count": 3,
        "sources": [
          "fill",
          "gradient-stop"
        ]
      },
      {
        "key": "0,0,0,255",
        "hex": "#000000",
        "count": 2,
        "sources": [
          "stroke"
        ]
      },
      {
        "key": "0,0,255,255",
        "hex": "#0000FF",
        "count": 2,
        "sources": [
          "gradient-stop",
          "shadow"
        ]
      },
      {
        "key": "255,255,255,255",
        "hex": "#FFFFFF",
        "count": 1,
        "sources": [
          "fill"
        ]
      },
      {
        "key": "0,0,0,64",
        "hex": "#000000",
        "count": 1,
        "sources": [
          "shadow"
        ]
      }
    ]
    "###);
}

#[test]
fn test_scan_card_metrics() {
    let result = scan(&card().selection, &ScanOptions::default());
    assert_eq!(
        result.metrics,
        Metrics {
            visited_nodes: 8,
            skipped: 1,
            failed: 0,
            modified_paints: 0,
            modified_effects: 0,
        }
    );
}

#[test]
fn test_scan_card_fills_only() {
    let options = ScanOptions {
        include_fills: true,
        include_strokes: false,
        include_effects: false,
    };
    let result = scan(&card().selection, &options);

    let keys: Vec<String> = result.palette.iter().map(|e| e.key.to_string()).collect();
    assert_eq!(keys, vec!["255,0,0,255", "255,255,255,255", "0,0,255,255"]);
    assert!(result.palette.iter().all(|e| !e.sources.contains(&ColourSource::Shadow)));
}

#[test]
fn test_apply_card() {
    let mut document = card();
    let metrics = apply(&mut document.selection, &hue(120.0), |_| {});

    assert_eq!(
        metrics,
        Metrics {
            visited_nodes: 8,
            skipped: 1,
            failed: 1,
            modified_paints: 2,
            modified_effects: 1,
        }
    );

    // Locked badge keeps its colour
    assert_eq!(
        child(&document, "Badge").fills,
        child(&card(), "Badge").fills,
    );
    // Hidden paints are left alone
    assert_eq!(
        child(&document, "Hidden").fills,
        child(&card(), "Hidden").fills,
    );

    let hexes: Vec<String> = scan(&document.selection, &ScanOptions::default())
        .palette
        .iter()
        .map(|e| format!("{}x{}", e.key, e.count))
        .collect();
    assert_eq!(
        hexes,
        vec![
            "255,0,0,255x3",
            "0,255,0,255x2",
            "0,0,0,255x2",
            "255,255,255,255x1",
            "0,0,0,64x1",
        ]
    );
}

#[test]
fn test_apply_card_override_precedence() {
    let mut document = card();
    let overrides: HueOverrides = [(ColourKey::new(0, 0, 255, 255), 0.0)].into_iter().collect();
    let request = hue(120.0).with_overrides(overrides);
    let metrics = apply(&mut document.selection, &request, |_| {});

    // Only the red header fill and the red gradient stop move
    assert_eq!(metrics.modified_paints, 2);
    assert_eq!(metrics.modified_effects, 0);

    match &child(&document, "Button").fills {
        Attr::Concrete(paints) => {
            let stops = &paints[0].gradient().unwrap().gradient_stops;
            assert_eq!(stops[0].color.hex(), "#00FF00");
            assert_eq!(stops[1].color.hex(), "#0000FF");
        }
        other => panic!("Expected concrete fills, got {:?}", other),
    }
}

#[test]
fn test_apply_card_preserves_unknown_fields() {
    let mut document = card();
    apply(&mut document.selection, &hue(90.0), |_| {});

    let json: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
    let children = &json["selection"][0]["children"];
    assert_eq!(children[0]["cornerRadius"], 8);
    assert_eq!(children[1]["fills"][0]["gradientTransform"][0][0], 1);
    assert_eq!(children[3]["effects"][0]["offset"]["y"], 4);
    assert_eq!(children[5]["fills"][0]["imageHash"], "abc123");
    assert_eq!(children[2]["fills"], "mixed");
}

#[test]
fn test_apply_identity_is_noop() {
    let mut document = card();
    let metrics = apply(&mut document.selection, &ApplyRequest::default(), |_| {});

    assert_eq!(metrics.modified_paints, 0);
    assert_eq!(metrics.modified_effects, 0);
    assert_eq!(metrics.failed, 0);
    assert_eq!(document, card());
}

#[test]
fn test_apply_progress_on_wide_tree() {
    let mut root = Node::group("Root");
    for i in 0..120 {
        root = root.with_child(
            Node::new(format!("Rect {}", i)).with_fills(vec![Paint::solid(retint::colour::Rgb::new(1.0, 0.0, 0.0))]),
        );
    }

    let mut progress = Vec::new();
    let metrics = apply(&mut [root], &hue(30.0), |p| progress.push((p.processed, p.total)));

    assert_eq!(metrics.visited_nodes, 121);
    assert_eq!(metrics.modified_paints, 120);
    assert_eq!(progress, vec![(50, 121), (100, 121)]);
}

#[test]
fn test_session_round_trip() {
    let mut document = card();
    let mut replies = Vec::new();
    Session::new()
        .handle_json(
            r##"{"type":"APPLY_REQUEST","options":{"includeFills":true,"includeStrokes":true,"includeEffects":false,"keepWhite":true},"satDelta":0,"lightDelta":0,"hueDelta":120,"colorMapping":{"#FF0000":240}}"##,
            &mut document.selection,
            |m| replies.push(m),
        )
        .unwrap();

    assert_eq!(replies.len(), 2);
    match &replies[0] {
        UiMessage::ApplyResult { metrics } => {
            assert_eq!(metrics.modified_paints, 2);
            assert_eq!(metrics.modified_effects, 0);
            assert_eq!(metrics.failed, 1);
        }
        other => panic!("Expected apply result, got {:?}", other),
    }
    match &replies[1] {
        UiMessage::ScanResult(result) => {
            // Red rotated by its own 240 degrees lands on blue
            assert_eq!(result.palette[0].key, ColourKey::new(0, 0, 255, 255));
        }
        other => panic!("Expected scan result, got {:?}", other),
    }
}
