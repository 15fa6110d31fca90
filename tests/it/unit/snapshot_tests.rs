//! Snapshot tests using the insta crate.
//!
//! Inline JSON snapshots pin down the serialized shape the front-end reads:
//! list cards, landmark details and tile layer configs.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{engraving_json, landmarks_json};
use engraving_atlas::app::ListCard;
use engraving_atlas::catalog::{Catalog, Engraving};
use engraving_atlas::landmarks::{LandmarkDb, LandmarkDetail};
use engraving_atlas::map::TileLayerKind;

fn engraving(id: &str, title: &str) -> Engraving {
    serde_json::from_value(engraving_json(id, title, "1841", "Riverfront")).unwrap()
}

// ============================================================================
// List cards
// ============================================================================

#[test]
fn snapshot_list_card() {
    let mut item = engraving("steel_engraving_0001", "Public Landing");
    item.description = "Steamboats crowd the public landing while drays carry freight up the cobbled levee toward the warehouses of Front Street.".into();
    insta::assert_json_snapshot!(ListCard::from(&item), @r#"
    {
      "id": "steel_engraving_0001",
      "title": "Public Landing",
      "artist": "W. Wellstood",
      "date": "1841",
      "neighborhood": "Riverfront",
      "excerpt": "Steamboats crowd the public landing while drays carry freight up the cobbled levee toward the wareho...",
      "thumbnail": "engravings/thumbs/steel_engraving__0001_thumb.jpg"
    }
    "#);
}

// ============================================================================
// Landmark detail
// ============================================================================

#[test]
fn snapshot_landmark_detail() {
    let db = LandmarkDb::from_json(&landmarks_json().to_string()).unwrap();
    let catalog = Catalog::new(vec![engraving("steel_engraving_0001", "Public Landing")]);
    let detail = LandmarkDetail::lookup("roebling", &db, &catalog).unwrap();
    insta::assert_json_snapshot!(detail, @r#"
    {
      "id": "roebling",
      "name": "Roebling Suspension Bridge",
      "category": "bridge",
      "status": "extant",
      "description": "Suspension bridge across the Ohio.",
      "blip": "Longest span in the world when it opened.",
      "historicalContext": "Completed in 1866.",
      "appearsIn": [
        {
          "id": "steel_engraving_0001",
          "title": "Public Landing"
        },
        {
          "id": "steel_engraving_0404",
          "title": "steel_engraving_0404"
        }
      ],
      "links": [
        {
          "title": "Wikipedia",
          "url": "https://www.wikipedia.org/wiki/John_A._Roebling_Suspension_Bridge",
          "domain": "wikipedia.org"
        }
      ]
    }
    "#);
}

// ============================================================================
// Tile layers
// ============================================================================

#[test]
fn snapshot_historical_layer() {
    insta::assert_json_snapshot!(TileLayerKind::Historical.config(), @r#"
    {
      "kind": "historical",
      "url": "https://server.arcgisonline.com/ArcGIS/rest/services/USA_Topo_Maps/MapServer/tile/{z}/{y}/{x}",
      "attribution": "Tiles © Esri — Source: USGS, Esri, TANA, DeLorme, and NPS",
      "maxZoom": 16
    }
    "#);
}

#[test]
fn snapshot_modern_layer() {
    insta::assert_json_snapshot!(TileLayerKind::Modern.config(), @r#"
    {
      "kind": "modern",
      "url": "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
      "attribution": "© OpenStreetMap contributors",
      "maxZoom": 18
    }
    "#);
}
