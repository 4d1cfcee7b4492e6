//! Integration tests for `SqliteStore` against an in-memory database.

use dadd_core::{
  record::TrendOrder,
  region::{NewRegion, NewSubRegion},
  store::{DEFAULT_SEARCH_LIMIT, DaddStore},
};

use crate::SqliteStore;

/// Two regions with data, one sub-region whose only value is NULL.
const FIXTURE: &str = "
INSERT INTO REGION (region_id, region_name) VALUES
  (1, 'Africa'), (2, 'Asia'), (3, 'Europe');

INSERT INTO SUB_REGION (sub_region_id, sub_region_name, region_id) VALUES
  (10, 'Northern Africa', 1),
  (11, 'Sub-Saharan Africa', 1),
  (20, 'Eastern Asia', 2),
  (21, 'South-eastern Asia', 2);

INSERT INTO INTERMEDIATE_REGION (intermediate_region_id, intermediate_region_name, sub_region_id) VALUES
  (100, NULL, 10),
  (110, 'Eastern Africa', 11),
  (111, 'Western Africa', 11),
  (200, NULL, 20),
  (210, NULL, 21);

INSERT INTO COUNTRY (country_id, country_name, intermediate_region_id) VALUES
  (1, 'Algeria', 100), (2, 'Egypt', 100), (3, 'Morocco', 100),
  (4, 'Kenya', 110), (5, 'Ethiopia', 110),
  (6, 'Nigeria', 111), (7, 'Ghana', 111),
  (8, 'Japan', 200), (9, 'China', 200), (10, 'Mongolia', 200),
  (11, 'Laos', 210);

INSERT INTO DADD_RECORD (country_id, decade_id, dadd_value) VALUES
  (1, 1990, 5.0), (2, 1990, 3.0), (3, 1990, NULL), (4, 1990, 7.0),
  (5, 1990, 3.0), (6, 1990, 2.0), (7, 1990, NULL), (8, 1990, 9.0),
  (9, 1990, 9.0),
  (1, 2000, 6.0), (2, 2000, 6.0), (4, 2000, 10.0), (8, 2000, 1.0),
  (9, 2000, 4.0), (10, 2000, NULL), (11, 2000, NULL),
  (1, 2010, 8.0), (10, 2010, 2.5);
";

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.execute_script(FIXTURE).await.expect("fixture");
  s
}

// ─── Regions ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn region_create_list_edit_delete() {
  let s = store().await;

  let region = s
    .add_region(NewRegion { region_name: "Oceania".into() })
    .await
    .unwrap();
  let all = s.list_regions().await.unwrap();
  assert_eq!(all, vec![region.clone()]);

  let updated = s
    .update_region(region.region_id, NewRegion { region_name: "Oceania & Pacific".into() })
    .await
    .unwrap();
  assert!(updated);
  let fetched = s.get_region(region.region_id).await.unwrap().unwrap();
  assert_eq!(fetched.region_name, "Oceania & Pacific");

  assert!(s.delete_region(region.region_id).await.unwrap());
  assert!(s.list_regions().await.unwrap().is_empty());
  assert!(s.get_region(region.region_id).await.unwrap().is_none());
}

#[tokio::test]
async fn regions_list_by_id_and_by_name() {
  let s = store().await;
  s.add_region(NewRegion { region_name: "Europe".into() }).await.unwrap();
  s.add_region(NewRegion { region_name: "Africa".into() }).await.unwrap();

  let by_id: Vec<_> = s.list_regions().await.unwrap().into_iter().map(|r| r.region_name).collect();
  assert_eq!(by_id, vec!["Europe", "Africa"]);

  let by_name: Vec<_> = s
    .list_regions_by_name()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.region_name)
    .collect();
  assert_eq!(by_name, vec!["Africa", "Europe"]);
}

#[tokio::test]
async fn update_and_delete_missing_region_report_false() {
  let s = store().await;
  assert!(!s.update_region(42, NewRegion { region_name: "x".into() }).await.unwrap());
  assert!(!s.delete_region(42).await.unwrap());
}

#[tokio::test]
async fn deleting_region_orphans_sub_regions() {
  let s = seeded().await;
  assert!(s.delete_region(1).await.unwrap());

  let northern = s.get_sub_region(10).await.unwrap().unwrap();
  assert_eq!(northern.region_id, None);
  assert_eq!(northern.region_name, None);
}

// ─── Sub-regions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn sub_region_create_edit_delete() {
  let s = store().await;
  let africa = s.add_region(NewRegion { region_name: "Africa".into() }).await.unwrap();
  let asia   = s.add_region(NewRegion { region_name: "Asia".into() }).await.unwrap();

  let sub = s
    .add_sub_region(NewSubRegion {
      sub_region_name: "Northern Africa".into(),
      region_id:       Some(africa.region_id),
    })
    .await
    .unwrap();

  let listed = s.list_sub_regions().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].region_name.as_deref(), Some("Africa"));

  assert!(
    s.update_sub_region(sub.sub_region_id, NewSubRegion {
      sub_region_name: "Western Asia".into(),
      region_id:       Some(asia.region_id),
    })
    .await
    .unwrap()
  );
  let fetched = s.get_sub_region(sub.sub_region_id).await.unwrap().unwrap();
  assert_eq!(fetched.sub_region_name, "Western Asia");
  assert_eq!(fetched.region_name.as_deref(), Some("Asia"));

  assert!(s.delete_sub_region(sub.sub_region_id).await.unwrap());
  assert!(s.list_sub_regions().await.unwrap().is_empty());
  assert!(!s.delete_sub_region(sub.sub_region_id).await.unwrap());
}

#[tokio::test]
async fn sub_region_without_region() {
  let s = store().await;
  let sub = s
    .add_sub_region(NewSubRegion { sub_region_name: "Antarctica".into(), region_id: None })
    .await
    .unwrap();
  let listed = s.list_sub_regions().await.unwrap();
  assert_eq!(listed[0].sub_region_id, sub.sub_region_id);
  assert_eq!(listed[0].region_id, None);
  assert_eq!(listed[0].region_name, None);
}

#[tokio::test]
async fn deleting_sub_region_with_children_fails() {
  let s = seeded().await;
  assert!(s.delete_sub_region(10).await.is_err());
  assert!(s.get_sub_region(10).await.unwrap().is_some());
}

#[tokio::test]
async fn sub_regions_by_name() {
  let s = seeded().await;
  let names: Vec<_> = s
    .list_sub_regions_by_name()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.sub_region_name)
    .collect();
  assert_eq!(
    names,
    vec!["Eastern Asia", "Northern Africa", "South-eastern Asia", "Sub-Saharan Africa"]
  );
}

// ─── Reference data ──────────────────────────────────────────────────────────

#[tokio::test]
async fn intermediate_regions_carry_sub_region_name() {
  let s = seeded().await;
  let rows = s.list_intermediate_regions().await.unwrap();
  let ids: Vec<_> = rows.iter().map(|r| r.intermediate_region_id).collect();
  assert_eq!(ids, vec![100, 110, 111, 200, 210]);
  assert_eq!(rows[0].intermediate_region_name, None);
  assert_eq!(rows[0].sub_region_name.as_deref(), Some("Northern Africa"));
  assert_eq!(rows[1].intermediate_region_name.as_deref(), Some("Eastern Africa"));
}

#[tokio::test]
async fn countries_and_decades() {
  let s = seeded().await;
  let countries = s.list_countries().await.unwrap();
  assert_eq!(countries.len(), 11);
  assert_eq!(countries[0].country_name, "Algeria");
  assert_eq!(countries[10].country_name, "Nigeria");

  assert_eq!(s.list_decades().await.unwrap(), vec![1990, 2000, 2010]);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn country_trend_in_both_orders() {
  let s = seeded().await;
  let desc: Vec<_> = s
    .country_trend(1, TrendOrder::Descending)
    .await
    .unwrap()
    .into_iter()
    .map(|p| (p.decade_id, p.dadd_value))
    .collect();
  assert_eq!(desc, vec![(2010, Some(8.0)), (2000, Some(6.0)), (1990, Some(5.0))]);

  let asc: Vec<_> = s
    .country_trend(1, TrendOrder::Ascending)
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.decade_id)
    .collect();
  assert_eq!(asc, vec![1990, 2000, 2010]);

  assert!(s.country_trend(999, TrendOrder::Ascending).await.unwrap().is_empty());
}

#[tokio::test]
async fn sub_region_decade_sorts_nulls_last() {
  let s = seeded().await;
  let rows = s.sub_region_decade(10, 1990).await.unwrap();
  let got: Vec<_> = rows
    .iter()
    .map(|r| (r.country_name.as_str(), r.dadd_value))
    .collect();
  assert_eq!(got, vec![("Egypt", Some(3.0)), ("Algeria", Some(5.0)), ("Morocco", None)]);
  assert!(rows.iter().all(|r| r.sub_region_name == "Northern Africa" && r.decade_id == 1990));
}

#[tokio::test]
async fn sub_region_decade_breaks_ties_by_name() {
  let s = seeded().await;
  let names: Vec<_> = s
    .sub_region_decade(10, 2000)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.country_name)
    .collect();
  assert_eq!(names, vec!["Algeria", "Egypt"]);
}

#[tokio::test]
async fn sub_region_decade_rows_are_non_decreasing() {
  let s = seeded().await;
  for sub in [10, 11, 20, 21] {
    for decade in [1990, 2000, 2010] {
      let rows = s.sub_region_decade(sub, decade).await.unwrap();
      for pair in rows.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        match (a.dadd_value, b.dadd_value) {
          (Some(x), Some(y)) => {
            assert!(x < y || (x == y && a.country_name <= b.country_name));
          }
          (None, Some(_)) => panic!("NULL sorted before a value"),
          (Some(_), None) => {}
          (None, None) => assert!(a.country_name <= b.country_name),
        }
      }
    }
  }
}

#[tokio::test]
async fn region_decade_averages_group_by_sub_region() {
  let s = seeded().await;
  let rows = s.region_decade_averages(1, 1990).await.unwrap();
  let got: Vec<_> = rows
    .iter()
    .map(|r| (r.sub_region_name.as_str(), r.avg_dadd, r.country_count))
    .collect();
  // Equal averages fall back to sub-region name.
  assert_eq!(
    got,
    vec![("Northern Africa", Some(4.0), 2), ("Sub-Saharan Africa", Some(4.0), 3)]
  );
  assert!(rows.iter().all(|r| r.region_name == "Africa" && r.decade_id == 1990));
}

#[tokio::test]
async fn region_decade_averages_put_null_average_last() {
  let s = seeded().await;
  let got: Vec<_> = s
    .region_decade_averages(2, 2000)
    .await
    .unwrap()
    .into_iter()
    .map(|r| (r.sub_region_id, r.avg_dadd, r.country_count))
    .collect();
  assert_eq!(got, vec![(20, Some(2.5), 2), (21, None, 0)]);
}

#[tokio::test]
async fn region_decade_averages_empty_for_unknown_region() {
  let s = seeded().await;
  assert!(s.region_decade_averages(3, 1990).await.unwrap().is_empty());
  assert!(s.region_decade_averages(1, 1850).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_latest_without_text_lists_by_name() {
  let s = seeded().await;
  let rows = s.search_latest(None).await.unwrap();
  let names: Vec<_> = rows.iter().map(|r| r.country_name.as_str()).collect();
  assert_eq!(
    names,
    vec![
      "Algeria", "China", "Egypt", "Ethiopia", "Ghana", "Japan", "Kenya", "Laos",
      "Mongolia", "Morocco", "Nigeria",
    ]
  );

  let algeria = &rows[0];
  assert_eq!((algeria.decade, algeria.dadd_value), (2010, Some(8.0)));
  let morocco = rows.iter().find(|r| r.country_name == "Morocco").unwrap();
  assert_eq!((morocco.decade, morocco.dadd_value), (1990, None));
}

#[tokio::test]
async fn search_latest_default_listing_is_capped() {
  let s = store().await;
  let mut script = String::new();
  for i in 1..=40 {
    script.push_str(&format!(
      "INSERT INTO COUNTRY (country_id, country_name) VALUES ({i}, 'Country {i:02}');
       INSERT INTO DADD_RECORD (country_id, decade_id, dadd_value) VALUES ({i}, 2000, {i}.0);\n"
    ));
  }
  s.execute_script(script).await.unwrap();

  let rows = s.search_latest(None).await.unwrap();
  assert_eq!(rows.len(), DEFAULT_SEARCH_LIMIT as usize);
  assert_eq!(rows[0].country_name, "Country 01");
  assert_eq!(rows[29].country_name, "Country 30");

  // Blank text is the same as no text.
  assert_eq!(s.search_latest(Some("   ")).await.unwrap().len(), 30);

  // A search is not capped.
  assert_eq!(s.search_latest(Some("country")).await.unwrap().len(), 40);
}

#[tokio::test]
async fn search_latest_matches_case_insensitive_substring() {
  let s = seeded().await;
  let names: Vec<_> = s
    .search_latest(Some("AN"))
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.country_name)
    .collect();
  assert_eq!(names, vec!["Ghana", "Japan"]);
}

#[tokio::test]
async fn search_latest_treats_wildcards_literally() {
  let s = seeded().await;
  assert!(s.search_latest(Some("%")).await.unwrap().is_empty());
  assert!(s.search_latest(Some("_")).await.unwrap().is_empty());
}

const WORLD_NAMES: &str = "
INSERT INTO COUNTRY (country_id, country_name) VALUES
  (1, 'Zimbabwe'), (2, 'Åland Islands'), (3, 'eSwatini'),
  (4, 'Côte d''Ivoire'), (5, 'Albania');
INSERT INTO DADD_RECORD (country_id, decade_id, dadd_value) VALUES
  (1, 2000, 1.0), (2, 2000, 2.0), (3, 2000, 3.0), (4, 2000, 4.0), (5, 2000, 5.0);
";

#[tokio::test]
async fn names_sort_ignoring_case_and_accents() {
  let s = store().await;
  s.execute_script(WORLD_NAMES).await.unwrap();
  let expected = ["Åland Islands", "Albania", "Côte d'Ivoire", "eSwatini", "Zimbabwe"];

  let listed: Vec<_> = s
    .search_latest(None)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.country_name)
    .collect();
  assert_eq!(listed, expected);

  let countries: Vec<_> = s
    .list_countries()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.country_name)
    .collect();
  assert_eq!(countries, expected);
}

#[tokio::test]
async fn search_latest_matches_non_ascii_names() {
  let s = store().await;
  s.execute_script(WORLD_NAMES).await.unwrap();
  let search = |text: &'static str| {
    let s = s.clone();
    async move {
      s.search_latest(Some(text))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.country_name)
        .collect::<Vec<_>>()
    }
  };
  assert_eq!(search("CÔTE").await, ["Côte d'Ivoire"]);
  assert_eq!(search("åland").await, ["Åland Islands"]);
  assert_eq!(search("ESWAT").await, ["eSwatini"]);
  // Accents are ignored on both sides.
  assert_eq!(search("cote").await, ["Côte d'Ivoire"]);
}

#[tokio::test]
async fn decade_summary_counts_and_extremes() {
  let s = seeded().await;
  let summary = s.decade_summary(2010).await.unwrap();
  assert_eq!(summary.total_countries, 2);
  assert_eq!(summary.avg_dadd, Some(5.25));
  assert_eq!(summary.top.unwrap().country_name, "Algeria");
  let bottom = summary.bottom.unwrap();
  assert_eq!((bottom.country_name.as_str(), bottom.dadd_value), ("Mongolia", 2.5));
}

#[tokio::test]
async fn decade_summary_rounds_and_breaks_ties_by_name() {
  let s = seeded().await;
  let summary = s.decade_summary(1990).await.unwrap();
  // COUNT(*) includes NULL values; AVG does not: 38 / 7.
  assert_eq!(summary.total_countries, 9);
  assert_eq!(summary.avg_dadd, Some(5.43));
  // Japan and China tie at 9.0.
  assert_eq!(summary.top.unwrap().country_name, "China");
  assert_eq!(summary.bottom.unwrap().country_name, "Nigeria");
}

#[tokio::test]
async fn decade_summary_single_record() {
  let s = seeded().await;
  s.execute_script("INSERT INTO DADD_RECORD VALUES (7, 2020, 4.5);")
    .await
    .unwrap();
  let summary = s.decade_summary(2020).await.unwrap();
  assert_eq!(summary.total_countries, 1);
  assert_eq!(summary.avg_dadd, Some(4.5));
  assert_eq!(summary.top.as_ref().unwrap().country_name, "Ghana");
  assert_eq!(summary.top, summary.bottom);
}

#[tokio::test]
async fn decade_summary_for_unknown_decade_is_empty() {
  let s = seeded().await;
  let summary = s.decade_summary(1800).await.unwrap();
  assert_eq!(summary.total_countries, 0);
  assert_eq!(summary.avg_dadd, None);
  assert!(summary.top.is_none());
  assert!(summary.bottom.is_none());
}

// ─── Scripts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_missing_file_is_io_error() {
  let s = store().await;
  let err = s.import_file("/nonexistent/fixture.sql").await.unwrap_err();
  assert!(matches!(err, crate::Error::Io(_)));
}

// ─── Connectivity ────────────────────────────────────────────────────────────

#[tokio::test]
async fn deferred_store_fails_until_database_opens() {
  let dir = std::env::temp_dir().join(format!("dadd-deferred-{}", std::process::id()));
  let _ = std::fs::remove_dir_all(&dir);
  let s = SqliteStore::deferred(dir.join("dadd.sqlite3"));

  // The parent directory does not exist yet, so the open fails on every call.
  for _ in 0..2 {
    let err = s.list_regions().await.unwrap_err();
    assert!(matches!(err, crate::Error::Database(_)), "{err}");
  }

  // Once the path becomes usable the next call opens it and creates the schema.
  std::fs::create_dir_all(&dir).unwrap();
  assert!(s.list_regions().await.unwrap().is_empty());
  s.add_region(NewRegion { region_name: "Africa".into() }).await.unwrap();
  assert_eq!(s.list_regions().await.unwrap().len(), 1);

  std::fs::remove_dir_all(&dir).unwrap();
}
