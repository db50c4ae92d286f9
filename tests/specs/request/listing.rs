//! Listing specs
//!
//! Fixed page size of 10, newest-created first, filters compose. Pages
//! partition the result set: no row repeats, none is skipped.

use crate::prelude::*;
use std::collections::BTreeSet;

async fn file_as(world: &World, user: &str, equipment: EquipmentId, description: &str) -> ServiceRequest {
    world
        .lifecycle
        .create_request(
            &Actor::responsable(user),
            NewRequest {
                equipment_id: equipment,
                requester_id: user.to_string(),
                description: Some(description.to_string()),
            },
        )
        .await
        .unwrap()
}

fn page(n: u32) -> RequestFilter {
    RequestFilter {
        page: n,
        ..Default::default()
    }
}

#[tokio::test]
async fn lists_newest_first() {
    let world = World::new();
    for i in 1..=3 {
        world.file(Some(&format!("falla {i}"))).await;
        world.clock.advance(Duration::minutes(1));
    }

    let rows = world.lifecycle.list(&page(1)).await.unwrap().rows;
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn ties_on_created_at_break_by_id_descending() {
    let world = World::new();
    // Frozen clock: both rows share created_at.
    world.file(Some("primera")).await;
    world.file(Some("segunda")).await;

    let rows = world.lifecycle.list(&page(1)).await.unwrap().rows;
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn pages_partition_twenty_three_rows() {
    let world = World::new();
    for i in 1..=23 {
        world.file(Some(&format!("falla {i}"))).await;
        world.clock.advance(Duration::minutes(1));
    }

    let first = world.lifecycle.list(&page(1)).await.unwrap();
    let second = world.lifecycle.list(&page(2)).await.unwrap();
    let third = world.lifecycle.list(&page(3)).await.unwrap();

    assert_eq!(first.rows.len(), PAGE_SIZE);
    assert_eq!(second.rows.len(), PAGE_SIZE);
    assert_eq!(third.rows.len(), 3);
    for p in [&first, &second, &third] {
        assert_eq!(p.total, 23);
        assert_eq!(p.page_count(), 3);
    }

    let mut seen = BTreeSet::new();
    for row in first
        .rows
        .iter()
        .chain(second.rows.iter())
        .chain(third.rows.iter())
    {
        assert!(seen.insert(row.id), "request {} appeared twice", row.id);
    }
    assert_eq!(seen.len(), 23);
}

#[tokio::test]
async fn out_of_range_page_is_empty_with_correct_total() {
    let world = World::new();
    for _ in 0..3 {
        world.file(None).await;
    }

    let fourth = world.lifecycle.list(&page(4)).await.unwrap();
    assert!(fourth.rows.is_empty());
    assert_eq!(fourth.total, 3);
}

#[tokio::test]
async fn status_filter_narrows_rows() {
    let world = World::new();
    let a = world.file(Some("sin imagen")).await;
    let b = world.file(Some("teclado")).await;
    world.file(Some("ruido")).await;
    world
        .lifecycle
        .set_status(&admin(), a.id, RequestStatus::Approved)
        .await
        .unwrap();
    world
        .lifecycle
        .set_status(&admin(), b.id, RequestStatus::Rejected)
        .await
        .unwrap();

    let approved = world
        .lifecycle
        .list(&RequestFilter {
            status: Some(RequestStatus::Approved),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(approved.total, 1);
    assert_eq!(approved.rows[0].id, a.id);
}

#[tokio::test]
async fn requester_filter_narrows_rows() {
    let world = World::new();
    world.file(Some("laptop lenta")).await;
    file_as(&world, "resp-2", world.printer, "atasco de papel").await;
    file_as(&world, "resp-2", world.printer, "sin tóner").await;

    let theirs = world
        .lifecycle
        .list(&RequestFilter {
            requester_id: Some("resp-2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(theirs.total, 2);
    assert!(theirs.rows.iter().all(|r| r.requester_id == "resp-2"));
}

#[tokio::test]
async fn search_matches_description_case_insensitively() {
    let world = World::new();
    world.file(Some("Pantalla ROTA en aula 3")).await;
    world.file(Some("tinta agotada")).await;

    let hits = world
        .lifecycle
        .list(&RequestFilter {
            search: Some("pantalla rota".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(hits.total, 1);
    assert_eq!(
        hits.rows[0].description.as_deref(),
        Some("Pantalla ROTA en aula 3")
    );
}

#[tokio::test]
async fn blank_search_is_ignored() {
    let world = World::new();
    world.file(Some("sin imagen")).await;
    world.file(None).await;

    let all = world
        .lifecycle
        .list(&RequestFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(all.total, 2);
}

#[tokio::test]
async fn date_range_covers_whole_civil_days() {
    let world = World::new();
    world.clock.set(Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap());
    world.file(Some("lunes")).await;
    world.clock.set(Utc.with_ymd_and_hms(2026, 5, 5, 23, 59, 59).unwrap());
    let tuesday = world.file(Some("martes")).await;
    world.clock.set(Utc.with_ymd_and_hms(2026, 5, 6, 0, 0, 0).unwrap());
    world.file(Some("miércoles")).await;

    let day = NaiveDate::from_ymd_opt(2026, 5, 5).unwrap();

    let only_tuesday = world
        .lifecycle
        .list(&RequestFilter {
            date_from: Some(day),
            date_to: Some(day),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(only_tuesday.total, 1);
    assert_eq!(only_tuesday.rows[0].id, tuesday.id);

    let from_tuesday = world
        .lifecycle
        .list(&RequestFilter {
            date_from: Some(day),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(from_tuesday.total, 2);

    let until_tuesday = world
        .lifecycle
        .list(&RequestFilter {
            date_to: Some(day),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(until_tuesday.total, 2);
}
