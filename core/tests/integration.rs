//! Full diner flow against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the core through a
//! real `HttpTransport` built on ureq. Validates request building, response
//! parsing, the submission protocol, and the at-most-once ticket guarantee
//! end-to-end with the actual server.

use tableside_core::{
    ApiError, Cart, CartAction, CartState, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    MemoryStore, MenuItem, OrderingClient, SubmitError, Submitter, ValidationError,
};

/// Execute requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data — status interpretation belongs to the
/// client's `parse_*` methods. Only connection-level failures become
/// `ApiError::Transport`.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => self.agent.get(&request.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&request.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&request.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&request.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the mock server on a random port and return its address.
fn spawn_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn find_item<'a>(menu: &'a [MenuItem], name: &str) -> &'a MenuItem {
    menu.iter().find(|i| i.name == name).expect("item on menu")
}

#[test]
fn full_diner_flow() {
    let addr = spawn_server();
    let client = OrderingClient::new(&format!("http://{addr}"), mock_server::DEMO_CAFE_ID);
    let mut transport = UreqTransport::new();

    // Step 1: the host fetches tables and menu for the cafe.
    let tables = client.list_tables(&mut transport).unwrap();
    assert!(!tables.is_empty());
    let menu = client.list_menu(&mut transport).unwrap();
    assert!(menu.len() >= 3);

    // Step 2: build the cart — one pizza twice, one espresso.
    let mut cart = Cart::new(MemoryStore::default());
    cart.dispatch(CartAction::SetTableId(tables[0].id));
    cart.dispatch(CartAction::SetCustomerName("Mia".to_string()));
    cart.dispatch(CartAction::AddItem(find_item(&menu, "Margherita").clone()));
    cart.dispatch(CartAction::AddItem(find_item(&menu, "Margherita").clone()));
    cart.dispatch(CartAction::AddItem(find_item(&menu, "Espresso").clone()));
    cart.dispatch(CartAction::SetComment("no basil".to_string()));
    assert_eq!(cart.state().items.len(), 2);
    assert_eq!(cart.state().item_count(), 3);

    // Step 3: submit — start, two line writes, one comment write.
    let mut submitter = Submitter::new();
    submitter.submit(&mut cart, &client, &mut transport).unwrap();
    assert_eq!(cart.state().order_id, Some(1));
    assert!(cart.state().is_order_placed);

    // Step 4: the host resets after the display delay.
    cart.dispatch(CartAction::ResetCart);
    assert_eq!(*cart.state(), CartState::default());
}

#[test]
fn failed_line_item_recovers_without_a_duplicate_ticket() {
    let addr = spawn_server();
    let client = OrderingClient::new(&format!("http://{addr}"), mock_server::DEMO_CAFE_ID);
    let mut transport = UreqTransport::new();

    let menu = client.list_menu(&mut transport).unwrap();
    let real = find_item(&menu, "Carbonara").clone();
    // Not on this cafe's menu; the server refuses the line with 404.
    let ghost = MenuItem {
        id: 999,
        ..real.clone()
    };

    let mut cart = Cart::new(MemoryStore::default());
    cart.dispatch(CartAction::SetTableId(1));
    cart.dispatch(CartAction::SetCustomerName("Noah".to_string()));
    cart.dispatch(CartAction::AddItem(real));
    cart.dispatch(CartAction::AddItem(ghost));

    let mut submitter = Submitter::new();
    let err = submitter
        .submit(&mut cart, &client, &mut transport)
        .unwrap_err();
    assert!(matches!(err, SubmitError::Api(ApiError::NotFound)));

    // The ticket exists and survives the failure.
    let order_id = cart.state().order_id.unwrap();
    assert!(!cart.state().is_order_placed);

    // Drop the bad line and retry the whole submission: same ticket, no
    // second start (a second start would have been assigned order id 2).
    cart.dispatch(CartAction::RemoveItem(999));
    submitter.submit(&mut cart, &client, &mut transport).unwrap();
    assert_eq!(cart.state().order_id, Some(order_id));
    assert_eq!(order_id, 1);
    assert!(cart.state().is_order_placed);
}

#[test]
fn unknown_table_surfaces_the_backend_refusal() {
    let addr = spawn_server();
    let client = OrderingClient::new(&format!("http://{addr}"), mock_server::DEMO_CAFE_ID);
    let mut transport = UreqTransport::new();

    let menu = client.list_menu(&mut transport).unwrap();
    let mut cart = Cart::new(MemoryStore::default());
    cart.dispatch(CartAction::SetTableId(999));
    cart.dispatch(CartAction::SetCustomerName("Mia".to_string()));
    cart.dispatch(CartAction::AddItem(menu[0].clone()));

    let err = Submitter::new()
        .submit(&mut cart, &client, &mut transport)
        .unwrap_err();
    assert!(matches!(err, SubmitError::Api(ApiError::NotFound)));
    assert_eq!(cart.state().order_id, None);
}

#[test]
fn validation_stops_an_empty_cart_before_the_network() {
    // No server at this address; a network call would fail loudly as a
    // transport error rather than a validation error.
    let client = OrderingClient::new("http://127.0.0.1:9", 1);
    let mut transport = UreqTransport::new();
    let mut cart = Cart::new(MemoryStore::default());

    let err = Submitter::new()
        .submit(&mut cart, &client, &mut transport)
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::EmptyCart)
    ));
}
