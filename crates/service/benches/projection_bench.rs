use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use chrono::{FixedOffset, TimeZone};
use models::{role, user_in_role};
use serde_json::json;
use service::patch::{apply_patch, PatchDocument, PatchOperation};
use service::projection::{FieldMapper, FieldSelection, JsonFieldMapper};
use service::user_in_role::UserInRoleDetail;
use uuid::Uuid;

fn sample() -> UserInRoleDetail {
    let at = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let grant = user_in_role::Model {
        id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        role_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        created_on: at,
        created_by: Uuid::new_v4(),
        updated_on: None,
        updated_by: None,
    };
    let mut detail = UserInRoleDetail::from(grant.clone());
    detail.role = Some(role::Model { id: grant.role_id, tenant_id: grant.tenant_id, name: "admin".into(), created_at: at });
    detail
}

fn bench_projection(c: &mut Criterion) {
    let detail = sample();
    let fields = "RoleId,UserId,CreatedOn,RoleId_Role.Name,RoleId_Role.CreatedAt";

    c.bench_function("field_selection_parse", |b| {
        b.iter(|| FieldSelection::parse::<UserInRoleDetail>(black_box(Some(fields))).unwrap());
    });

    let selection = FieldSelection::parse::<UserInRoleDetail>(Some(fields)).unwrap();
    c.bench_function("map_to_fields", |b| {
        b.iter(|| JsonFieldMapper.map_to_fields(black_box(Some(&detail)), &selection));
    });
}

fn bench_patch(c: &mut Criterion) {
    let grant = sample().grant;
    let doc = PatchDocument::new(vec![
        PatchOperation::Replace { path: "/RoleId".into(), value: json!(Uuid::new_v4()) },
        PatchOperation::Add { path: "/UpdatedBy".into(), value: json!(Uuid::new_v4()) },
        PatchOperation::Remove { path: "/UpdatedOn".into() },
    ]);

    c.bench_function("apply_patch", |b| {
        b.iter(|| {
            let mut target = grant.clone();
            apply_patch(&mut target, black_box(&doc)).unwrap();
            target
        });
    });
}

criterion_group!(benches, bench_projection, bench_patch);
criterion_main!(benches);
