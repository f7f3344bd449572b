use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOrder {
    pub table_id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderItem {
    pub order_id: i64,
    pub cafe_id: i64,
    pub item_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveComment {
    pub order_id: i64,
    pub comment: String,
}

#[derive(Clone, Debug)]
pub struct OrderLine {
    pub item_id: i64,
    pub quantity: u32,
}

/// One ticket as the kitchen would see it.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub customer_name: String,
    pub comment: Option<String>,
    pub lines: Vec<OrderLine>,
}

/// Everything the server knows: tables and menus per cafe, open orders.
/// Lines accumulate exactly as sent — merging duplicates is the client
/// cart's job, and the tests rely on seeing the raw sequence.
#[derive(Debug, Default)]
pub struct CafeState {
    pub tables: HashMap<i64, Vec<Table>>,
    pub menus: HashMap<i64, Vec<MenuItem>>,
    pub orders: HashMap<i64, Order>,
    pub next_order_id: i64,
}

pub type Db = Arc<RwLock<CafeState>>;

/// Demo cafe used by the seeded [`app`].
pub const DEMO_CAFE_ID: i64 = 1;

fn seed() -> CafeState {
    let tables = vec![
        Table { id: 1, label: "Window 1".to_string() },
        Table { id: 2, label: "Window 2".to_string() },
        Table { id: 3, label: "Patio".to_string() },
        Table { id: 4, label: "Booth".to_string() },
    ];
    let menu = vec![
        MenuItem {
            id: 1,
            name: "Bruschetta".to_string(),
            description: "Grilled bread, tomatoes, basil".to_string(),
            price: Decimal::new(4500, 2),
            category: "Starters".to_string(),
            image_url: None,
        },
        MenuItem {
            id: 2,
            name: "Margherita".to_string(),
            description: "San Marzano, fior di latte".to_string(),
            price: Decimal::new(9500, 2),
            category: "Mains".to_string(),
            image_url: None,
        },
        MenuItem {
            id: 3,
            name: "Carbonara".to_string(),
            description: "Guanciale, pecorino, egg".to_string(),
            price: Decimal::new(11000, 2),
            category: "Mains".to_string(),
            image_url: None,
        },
        MenuItem {
            id: 4,
            name: "Tiramisu".to_string(),
            description: "House made".to_string(),
            price: Decimal::new(6500, 2),
            category: "Desserts".to_string(),
            image_url: None,
        },
        MenuItem {
            id: 5,
            name: "Espresso".to_string(),
            description: String::new(),
            price: Decimal::new(2500, 2),
            category: "Drinks".to_string(),
            image_url: None,
        },
    ];
    CafeState {
        tables: HashMap::from([(DEMO_CAFE_ID, tables)]),
        menus: HashMap::from([(DEMO_CAFE_ID, menu)]),
        orders: HashMap::new(),
        next_order_id: 1,
    }
}

/// Router seeded with the demo cafe.
pub fn app() -> Router {
    app_with_state(seed())
}

/// Router over a caller-provided state, for tests that need custom seeds.
pub fn app_with_state(state: CafeState) -> Router {
    let db: Db = Arc::new(RwLock::new(state));
    Router::new()
        .route("/tables/{cafe_id}", get(list_tables))
        .route("/menu/{cafe_id}", get(list_menu))
        .route("/order/start", post(start_order))
        .route("/order/add-item", post(add_item))
        .route("/order/comment", put(save_comment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tables(
    State(db): State<Db>,
    Path(cafe_id): Path<i64>,
) -> Result<Json<Vec<Table>>, StatusCode> {
    let state = db.read().await;
    state.tables.get(&cafe_id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_menu(
    State(db): State<Db>,
    Path(cafe_id): Path<i64>,
) -> Result<Json<Vec<MenuItem>>, StatusCode> {
    let state = db.read().await;
    state.menus.get(&cafe_id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn start_order(
    State(db): State<Db>,
    Json(input): Json<StartOrder>,
) -> Result<(StatusCode, Json<i64>), StatusCode> {
    let mut state = db.write().await;
    let table_known = state
        .tables
        .values()
        .any(|tables| tables.iter().any(|t| t.id == input.table_id));
    if !table_known {
        return Err(StatusCode::NOT_FOUND);
    }

    let id = state.next_order_id;
    state.next_order_id += 1;
    state.orders.insert(
        id,
        Order {
            id,
            table_id: input.table_id,
            customer_name: input.customer_name,
            comment: input.comment,
            lines: Vec::new(),
        },
    );
    info!(order_id = id, table_id = input.table_id, "order started");
    Ok((StatusCode::CREATED, Json(id)))
}

async fn add_item(
    State(db): State<Db>,
    Json(input): Json<AddOrderItem>,
) -> Result<StatusCode, StatusCode> {
    let mut state = db.write().await;
    let item_known = state
        .menus
        .get(&input.cafe_id)
        .is_some_and(|menu| menu.iter().any(|i| i.id == input.item_id));
    if !item_known {
        return Err(StatusCode::NOT_FOUND);
    }
    let order = state.orders.get_mut(&input.order_id).ok_or(StatusCode::NOT_FOUND)?;
    order.lines.push(OrderLine {
        item_id: input.item_id,
        quantity: input.quantity,
    });
    Ok(StatusCode::OK)
}

async fn save_comment(
    State(db): State<Db>,
    Json(input): Json<SaveComment>,
) -> Result<StatusCode, StatusCode> {
    let mut state = db.write().await;
    let order = state.orders.get_mut(&input.order_id).ok_or(StatusCode::NOT_FOUND)?;
    order.comment = Some(input.comment);
    Ok(StatusCode::OK)
}
