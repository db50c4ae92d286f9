//! Conversion specs
//!
//! Converting an approved request creates a Pendiente service, flips the
//! request to Convertida, and links the two rows. The compound mutation is
//! one bridge call: it either fully lands or nothing changes.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn conversion(request_id: i64, service_type_id: ServiceTypeId) -> ConversionInput {
    ConversionInput {
        request_id,
        service_type_id,
        service_date: None,
        notes: None,
    }
}

#[tokio::test]
async fn approved_request_converts_into_service() {
    let world = World::new();
    let approved = world.approved(Some("no enciende")).await;

    world.clock.advance(Duration::hours(1));
    let converted_at = world.clock.now();
    let service_id = world
        .lifecycle
        .convert_to_service(
            &admin(),
            ConversionInput {
                request_id: approved.id,
                service_type_id: world.maintenance,
                service_date: None,
                notes: Some("  revisar fuente  ".to_string()),
            },
        )
        .await
        .unwrap();

    let request = world.lifecycle.get(approved.id).await.unwrap();
    assert_eq!(request.status, RequestStatus::Converted);
    assert_eq!(request.service_id, Some(service_id));
    assert_eq!(request.updated_at, converted_at);
    assert_eq!(request.created_at, approved.created_at);

    let service = world.backend.service(service_id).await.unwrap().unwrap();
    assert_eq!(
        service,
        Service {
            id: service_id,
            equipment_id: world.laptop,
            service_type_id: world.maintenance,
            technician_id: Some("admin-1".to_string()),
            request_id: Some(approved.id),
            status: ServiceStatus::Pendiente,
            service_date: converted_at.date_naive(),
            description: Some("no enciende".to_string()),
            notes: Some("revisar fuente".to_string()),
            created_at: converted_at,
        }
    );
}

#[tokio::test]
async fn conversion_calls_the_bridge_exactly_once() {
    let world = World::new();
    let approved = world.approved(None).await;

    world
        .lifecycle
        .convert_to_service(&admin(), conversion(approved.id, world.maintenance))
        .await
        .unwrap();

    let calls = world.bridge.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].request_id, approved.id);
    assert_eq!(calls[0].service_type_id, world.maintenance);
    assert_eq!(calls[0].admin_id, "admin-1");
}

#[tokio::test]
async fn explicit_service_date_is_honored() {
    let world = World::new();
    let approved = world.approved(None).await;

    let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let service_id = world
        .lifecycle
        .convert_to_service(
            &admin(),
            ConversionInput {
                request_id: approved.id,
                service_type_id: world.maintenance,
                service_date: Some(date),
                notes: None,
            },
        )
        .await
        .unwrap();

    let service = world.backend.service(service_id).await.unwrap().unwrap();
    assert_eq!(service.service_date, date);
}

#[tokio::test]
async fn default_gate_requires_approval_first() {
    let world = World::new();
    let filed = world.file(None).await;

    let err = world
        .lifecycle
        .convert_to_service(&admin(), conversion(filed.id, world.maintenance))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "validation failed: request 1 is Enviada and cannot be converted"
    );
    assert!(world.bridge.calls().is_empty(), "gate rejects before the bridge");
}

#[tokio::test]
async fn permissive_gate_converts_straight_from_review() {
    let world = World::with_policy(LifecyclePolicy {
        conversion_gate: ConversionGate::AnyActive,
    });
    let filed = world.file(Some("tinta agotada")).await;
    world
        .lifecycle
        .set_status(&admin(), filed.id, RequestStatus::InReview)
        .await
        .unwrap();

    let service_id = world
        .lifecycle
        .convert_to_service(&admin(), conversion(filed.id, world.maintenance))
        .await
        .unwrap();

    let request = world.lifecycle.get(filed.id).await.unwrap();
    assert_eq!(request.status, RequestStatus::Converted);
    assert_eq!(request.service_id, Some(service_id));
}

#[tokio::test]
async fn permissive_gate_still_refuses_terminal_requests() {
    let world = World::with_policy(LifecyclePolicy {
        conversion_gate: ConversionGate::AnyActive,
    });
    let filed = world.file(None).await;
    world
        .lifecycle
        .set_status(&admin(), filed.id, RequestStatus::Rejected)
        .await
        .unwrap();

    let err = world
        .lifecycle
        .convert_to_service(&admin(), conversion(filed.id, world.maintenance))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Rechazada"));
    assert!(world.bridge.calls().is_empty());
}

#[tokio::test]
async fn failed_conversion_leaves_no_partial_state() {
    let world = World::new();
    let approved = world.approved(Some("no enciende")).await;

    world.clock.advance(Duration::hours(1));
    let err = world
        .lifecycle
        .convert_to_service(&admin(), conversion(approved.id, world.retired))
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::Conflict(_)));
    assert!(err.to_string().contains("is inactive"));
    assert_eq!(world.bridge.calls().len(), 1, "the attempt reached the bridge");

    // No service row, request byte-identical to before the attempt.
    let services = world
        .backend
        .list_services(&ServiceFilter::default())
        .await
        .unwrap();
    assert_eq!(services.total, 0);
    let after = world.lifecycle.get(approved.id).await.unwrap();
    assert_eq!(after, approved);
}

#[tokio::test]
async fn converted_request_cannot_convert_again() {
    let world = World::new();
    let approved = world.approved(None).await;
    world
        .lifecycle
        .convert_to_service(&admin(), conversion(approved.id, world.maintenance))
        .await
        .unwrap();

    let err = world
        .lifecycle
        .convert_to_service(&admin(), conversion(approved.id, world.maintenance))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "validation failed: request 1 is Convertida and cannot be converted"
    );
    let services = world
        .backend
        .list_services(&ServiceFilter::default())
        .await
        .unwrap();
    assert_eq!(services.total, 1, "no second service");
}

#[tokio::test]
async fn oversize_notes_are_rejected_before_the_bridge() {
    let world = World::new();
    let approved = world.approved(None).await;

    let err = world
        .lifecycle
        .convert_to_service(
            &admin(),
            ConversionInput {
                request_id: approved.id,
                service_type_id: world.maintenance,
                service_date: None,
                notes: Some("n".repeat(1001)),
            },
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("notes exceeds 1000"));
    assert!(world.bridge.calls().is_empty());
}

#[tokio::test]
async fn missing_request_is_not_found() {
    let world = World::new();

    let err = world
        .lifecycle
        .convert_to_service(&admin(), conversion(404, world.maintenance))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "request 404 not found");
}

#[tokio::test]
async fn only_admins_convert() {
    let world = World::new();
    let approved = world.approved(None).await;

    let err = world
        .lifecycle
        .convert_to_service(&responsable(), conversion(approved.id, world.maintenance))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "validation failed: only admins can convert requests"
    );
}
