//! End-to-end resolution against the in-memory services

use fanout::prelude::*;

fn resolvers() -> Resolvers {
    let accounts = InMemoryAccountService::with_accounts(
        (1..=20).map(|i| AccountRecord::new(i.to_string(), format!("account-{}", i))),
    );
    let catalog = InMemoryCatalogService::with_products([
        ProductRecord::new("p1", "Keyboard", "Tenkeyless", 129.0),
        ProductRecord::new("p2", "Monitor arm", "Gas spring", 89.5),
    ]);
    Resolvers::new(Arc::new(accounts), Arc::new(catalog))
}

#[tokio::test]
async fn test_account_pages_walk_the_collection() {
    let resolvers = resolvers();
    let ctx = CallContext::root();

    let first = resolvers
        .accounts(&ctx, None, Some(5), None)
        .await
        .unwrap()
        .into_vec();
    let third = resolvers
        .accounts(&ctx, Some(10), Some(5), None)
        .await
        .unwrap()
        .into_vec();

    assert_eq!(first.first().map(|a| a.id.as_str()), Some("1"));
    assert_eq!(
        third.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
        vec!["11", "12", "13", "14", "15"]
    );
}

#[tokio::test]
async fn test_default_page_returns_everything_below_limit() {
    let listing = resolvers()
        .accounts(&CallContext::root(), None, None, None)
        .await
        .unwrap();

    assert_eq!(listing.len(), 20);
    assert!(listing.len() as u64 <= DEFAULT_TAKE);
}

#[tokio::test]
async fn test_order_relationships_resolve() {
    let resolvers = resolvers();
    let ctx = CallContext::root();
    let order = Order::new("o-1", "7");

    let account = resolvers.order_account(&ctx, &order).await.unwrap();
    let products = resolvers
        .order_products(&ctx, &order, None, None)
        .await
        .unwrap();

    assert_eq!(account.name, "account-7");
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_unknown_owner_is_not_found() {
    let err = resolvers()
        .order_account(&CallContext::root(), &Order::new("o-1", "404"))
        .await
        .unwrap_err();

    assert_eq!(err.status, CallStatus::NotFound);
    assert_eq!(err.service, "account");
}

#[tokio::test]
async fn test_product_by_id() {
    let products = resolvers()
        .products(&CallContext::root(), None, None, Some("p2"))
        .await
        .unwrap()
        .into_vec();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Monitor arm");
}
