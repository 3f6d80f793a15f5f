use domain::{DomainError, GeoPoint, Role};
use mnemosyne_auth::{AuthorizationGuard, Authorizer};
use mnemosyne_registry::{DeviceService, HierarchyService, NodeService};
use mnemosyne_storage::{
    InMemoryDeviceStore, InMemoryGridStore, InMemoryNodeStore, InMemoryUserStore,
    InMemoryWorkspaceStore, NewUser, NodeStore, UserRecord, UserStore,
};
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    users: Arc<InMemoryUserStore>,
    nodes_store: Arc<InMemoryNodeStore>,
    hierarchy: HierarchyService,
    nodes: NodeService,
    devices: DeviceService,
}

fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserStore::new());
    let nodes_store = Arc::new(InMemoryNodeStore::new());
    let guard: Arc<dyn Authorizer> = Arc::new(AuthorizationGuard::new(users.clone()));
    Fixture {
        hierarchy: HierarchyService::new(
            Arc::new(InMemoryWorkspaceStore::new()),
            Arc::new(InMemoryGridStore::new()),
        ),
        nodes: NodeService::new(nodes_store.clone(), guard.clone()),
        devices: DeviceService::new(Arc::new(InMemoryDeviceStore::new()), guard),
        users,
        nodes_store,
    }
}

async fn user(fixture: &Fixture, email: &str, role: Role) -> UserRecord {
    fixture
        .users
        .create_user(NewUser {
            username: email.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role,
            current_workspace: None,
        })
        .await
        .expect("user")
}

fn point(latitude: f64, longitude: f64) -> Option<GeoPoint> {
    Some(GeoPoint::new(latitude, longitude).expect("point"))
}

fn coords(latitude: f64, longitude: f64) -> Option<(f64, f64)> {
    Some((latitude, longitude))
}

#[tokio::test]
async fn workspace_grid_node_scenario() {
    let fx = fixture();
    let admin = user(&fx, "admin@example.com", Role::Admin).await;

    let workspace = fx.hierarchy.create_workspace("W1").await.expect("workspace");
    let grid = fx.hierarchy.create_grid("G1", workspace.id).await.expect("grid");
    fx.nodes
        .create_node("N1", grid.id, point(10.0, 20.0), admin.id)
        .await
        .expect("node");

    let nodes = fx.nodes.list_by_grid(grid.id).await.expect("list");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "N1");
    assert_eq!(nodes[0].location.latitude(), 10.0);
    assert_eq!(nodes[0].location.longitude(), 20.0);
    assert!(nodes[0].active);
}

#[tokio::test]
async fn missing_workspace_and_grid_are_not_found() {
    let fx = fixture();
    assert!(matches!(
        fx.hierarchy.get_workspace(Uuid::new_v4()).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        fx.hierarchy.get_grid(Uuid::new_v4()).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn grids_list_only_matching_workspace() {
    let fx = fixture();
    let first = fx.hierarchy.create_workspace("W1").await.expect("workspace");
    let second = fx.hierarchy.create_workspace("W2").await.expect("workspace");
    fx.hierarchy.create_grid("G1", first.id).await.expect("grid");
    fx.hierarchy.create_grid("G2", first.id).await.expect("grid");
    fx.hierarchy.create_grid("G3", second.id).await.expect("grid");

    let grids = fx.hierarchy.list_grids(first.id).await.expect("list");
    assert_eq!(grids.len(), 2);
    assert!(grids.iter().all(|grid| grid.workspace_id == first.id));
}

#[tokio::test]
async fn node_without_location_is_rejected() {
    let fx = fixture();
    let grid_id = Uuid::new_v4();
    let err = fx
        .nodes
        .create_node("N1", grid_id, None, Uuid::new_v4())
        .await
        .expect_err("location");
    assert!(matches!(err, DomainError::InvalidArgument(_)));
    assert!(fx.nodes_store.list_nodes_by_grid(grid_id).await.expect("list").is_empty());
}

#[tokio::test]
async fn repeated_get_node_is_identical() {
    let fx = fixture();
    let node = fx
        .nodes
        .create_node("N1", Uuid::new_v4(), point(1.0, 1.0), Uuid::new_v4())
        .await
        .expect("node");
    let first = fx.nodes.get_node(node.id).await.expect("get");
    let second = fx.nodes.get_node(node.id).await.expect("get");
    assert_eq!(first, second);
}

#[tokio::test]
async fn update_node_needs_no_admin() {
    let fx = fixture();
    let plain = user(&fx, "u@example.com", Role::User).await;
    let node = fx
        .nodes
        .create_node("N1", Uuid::new_v4(), point(1.0, 1.0), plain.id)
        .await
        .expect("node");

    let updated = fx
        .nodes
        .update_node(node.id, plain.id, false)
        .await
        .expect("update");
    assert!(!updated.active);
    assert_eq!(updated.updated_by, plain.id);
}

#[tokio::test]
async fn non_admin_cannot_delete_node() {
    let fx = fixture();
    let plain = user(&fx, "u@example.com", Role::User).await;
    let node = fx
        .nodes
        .create_node("N1", Uuid::new_v4(), point(1.0, 1.0), plain.id)
        .await
        .expect("node");

    let err = fx.nodes.delete_node(plain.id, &node.id.to_string()).await.expect_err("deny");
    assert_eq!(err, DomainError::Unauthorized);
    assert!(fx.nodes.get_node(node.id).await.is_ok());

    // 守卫先于存在性检查
    let err = fx
        .nodes
        .delete_node(plain.id, &Uuid::new_v4().to_string())
        .await
        .expect_err("deny");
    assert_eq!(err, DomainError::Unauthorized);

    // 格式错误的目标标识同样先被守卫拒绝
    let err = fx
        .nodes
        .delete_node(plain.id, "not-a-uuid")
        .await
        .expect_err("deny");
    assert_eq!(err, DomainError::Unauthorized);
}

#[tokio::test]
async fn admin_deletes_node() {
    let fx = fixture();
    let admin = user(&fx, "admin@example.com", Role::Admin).await;
    let node = fx
        .nodes
        .create_node("N1", Uuid::new_v4(), point(1.0, 1.0), admin.id)
        .await
        .expect("node");

    fx.nodes.delete_node(admin.id, &node.id.to_string()).await.expect("delete");
    assert!(matches!(
        fx.nodes.get_node(node.id).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn self_report_scenario() {
    let fx = fixture();
    let plain = user(&fx, "u@example.com", Role::User).await;
    let node = fx
        .nodes
        .create_node("N1", Uuid::new_v4(), point(5.0, 5.0), plain.id)
        .await
        .expect("node");
    let device = fx
        .devices
        .create_device("dev-1", "tracker", plain.id)
        .await
        .expect("device");
    assert!(device.location.is_none());

    fx.devices
        .report_location("dev-1", coords(1.0, 2.0), &node.id.to_string(), plain.id)
        .await
        .expect("report");

    let fetched = fx.devices.get_device(device.id).await.expect("get");
    assert_eq!(fetched.location, point(1.0, 2.0));
    assert_eq!(fetched.node_id, Some(node.id));
    assert_eq!(fetched.updated_by, plain.id);
}

#[tokio::test]
async fn guarded_update_rejects_non_admin_without_mutation() {
    let fx = fixture();
    let plain = user(&fx, "u@example.com", Role::User).await;
    let admin = user(&fx, "admin@example.com", Role::Admin).await;
    let device = fx
        .devices
        .create_device("dev-1", "tracker", admin.id)
        .await
        .expect("device");
    let node_id = Uuid::new_v4().to_string();

    let err = fx
        .devices
        .update_device("dev-1", coords(3.0, 4.0), &node_id, plain.id)
        .await
        .expect_err("deny");
    assert_eq!(err, DomainError::Unauthorized);
    let unchanged = fx.devices.get_device(device.id).await.expect("get");
    assert!(unchanged.location.is_none());

    let updated = fx
        .devices
        .update_device("dev-1", coords(3.0, 4.0), &node_id, admin.id)
        .await
        .expect("update");
    assert_eq!(updated.id, device.id);
    assert_eq!(updated.location, point(3.0, 4.0));
}

#[tokio::test]
async fn report_for_unknown_key_is_not_found() {
    let fx = fixture();
    let err = fx
        .devices
        .report_location(
            "missing",
            coords(1.0, 2.0),
            &Uuid::new_v4().to_string(),
            Uuid::new_v4(),
        )
        .await
        .expect_err("missing");
    assert_eq!(err, DomainError::NotFound("device not found".to_string()));
}

#[tokio::test]
async fn duplicate_device_key_conflicts() {
    let fx = fixture();
    let creator = Uuid::new_v4();
    fx.devices
        .create_device("dev-1", "tracker", creator)
        .await
        .expect("device");
    let err = fx
        .devices
        .create_device("dev-1", "sensor", creator)
        .await
        .expect_err("duplicate");
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn non_admin_cannot_delete_device() {
    let fx = fixture();
    let plain = user(&fx, "u@example.com", Role::User).await;
    let device = fx
        .devices
        .create_device("dev-1", "tracker", plain.id)
        .await
        .expect("device");

    let err = fx
        .devices
        .delete_device(plain.id, &device.id.to_string())
        .await
        .expect_err("deny");
    assert_eq!(err, DomainError::Unauthorized);
    assert!(fx.devices.get_device(device.id).await.is_ok());
}

#[tokio::test]
async fn devices_list_by_node() {
    let fx = fixture();
    let creator = Uuid::new_v4();
    let node_id = Uuid::new_v4();
    for key in ["dev-1", "dev-2", "dev-3"] {
        fx.devices
            .create_device(key, "tracker", creator)
            .await
            .expect("device");
    }
    for key in ["dev-1", "dev-2"] {
        fx.devices
            .report_location(key, coords(0.0, 0.0), &node_id.to_string(), creator)
            .await
            .expect("report");
    }

    let devices = fx.devices.list_by_node(node_id).await.expect("list");
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|device| device.node_id == Some(node_id)));
}

#[tokio::test]
async fn guarded_update_checks_actor_before_input() {
    let fx = fixture();
    let plain = user(&fx, "u@example.com", Role::User).await;
    let admin = user(&fx, "admin@example.com", Role::Admin).await;
    let device = fx
        .devices
        .create_device("dev-1", "tracker", admin.id)
        .await
        .expect("device");
    let node_id = Uuid::new_v4().to_string();

    for (coordinates, node) in [
        (coords(95.0, 0.0), node_id.as_str()),
        (None, node_id.as_str()),
        (coords(1.0, 1.0), "not-a-uuid"),
    ] {
        let err = fx
            .devices
            .update_device("dev-1", coordinates, node, plain.id)
            .await
            .expect_err("deny");
        assert_eq!(err, DomainError::Unauthorized);
    }
    let unchanged = fx.devices.get_device(device.id).await.expect("get");
    assert!(unchanged.location.is_none());

    // 管理员通过守卫后才看到输入错误
    let err = fx
        .devices
        .update_device("dev-1", coords(95.0, 0.0), &node_id, admin.id)
        .await
        .expect_err("range");
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[tokio::test]
async fn self_report_validates_location() {
    let fx = fixture();
    let creator = Uuid::new_v4();
    let device = fx
        .devices
        .create_device("dev-1", "tracker", creator)
        .await
        .expect("device");
    let node_id = Uuid::new_v4().to_string();

    for coordinates in [coords(0.0, 181.0), None] {
        let err = fx
            .devices
            .report_location("dev-1", coordinates, &node_id, creator)
            .await
            .expect_err("invalid");
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }
    let err = fx
        .devices
        .report_location("dev-1", coords(1.0, 1.0), "nope", creator)
        .await
        .expect_err("invalid");
    assert!(matches!(err, DomainError::InvalidArgument(_)));
    assert!(fx.devices.get_device(device.id).await.expect("get").location.is_none());
}
