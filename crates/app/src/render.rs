//! Plain-text output for listings and navigation outcomes.

use stockroom_application::CatalogRecord;
use stockroom_domain::{
    AbcEntry, DashboardStats, Forecast, Navigation, Order, Product, SimulatedOrder, Supplier,
};

pub fn navigation(outcome: Navigation) -> String {
    match outcome {
        Navigation::Wait => "loading".to_string(),
        Navigation::Redirect(to) => format!("redirect {to}"),
        Navigation::Render(route) => format!("render {} ({route})", route.title()),
    }
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products");
        return;
    }
    println!(
        "{:>5}  {:<28} {:<16} {:>10} {:>7} {:>8}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK", "REORDER"
    );
    for p in products {
        let flag = if p.needs_reorder() { " !" } else { "" };
        println!(
            "{:>5}  {:<28} {:<16} {:>10.2} {:>7} {:>8}{flag}",
            p.id, p.name, p.category, p.price, p.stock_level, p.reorder_point
        );
    }
}

pub fn suppliers(suppliers: &[Supplier]) {
    if suppliers.is_empty() {
        println!("No suppliers");
        return;
    }
    println!("{:>5}  {:<28} {:<24} {:>11}", "ID", "NAME", "CONTACT", "RELIABILITY");
    for s in suppliers {
        let score = s
            .reliability_score
            .map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
        println!(
            "{:>5}  {:<28} {:<24} {score:>11}",
            s.id,
            s.name,
            s.contact_name.as_deref().unwrap_or("-"),
        );
    }
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders");
        return;
    }
    println!(
        "{:>5}  {:<28} {:>8} {:<10} {:<10}",
        "ID", "PRODUCT", "QTY", "STATUS", "DATE"
    );
    for o in orders {
        let product = o
            .product
            .as_ref()
            .map_or_else(|| format!("#{}", o.product_id), |p| p.name.clone());
        let date = o
            .placed_on()
            .map_or_else(|| o.order_date.clone(), |d| d.to_string());
        println!(
            "{:>5}  {product:<28} {:>8} {:<10} {date:<10}",
            o.id, o.quantity, o.status
        );
    }
}

/// One-line summary of a record the backend just saved.
pub fn record(record: &CatalogRecord) -> String {
    match record {
        CatalogRecord::Product(p) => format!("product {} ({})", p.id, p.name),
        CatalogRecord::Supplier(s) => format!("supplier {} ({})", s.id, s.name),
        CatalogRecord::Order(o) => format!(
            "order {} ({} x product {}, {})",
            o.id, o.quantity, o.product_id, o.status
        ),
    }
}

pub fn stats(stats: &DashboardStats) {
    println!("Total revenue     {:>10}", stats.total_revenue);
    println!("Products          {:>10}", stats.total_products);
    println!("Low stock alerts  {:>10}", stats.low_stock_alerts);
    println!("Active suppliers  {:>10}", stats.active_suppliers);
}

pub fn abc(entries: &[AbcEntry]) {
    if entries.is_empty() {
        println!("No products to classify");
        return;
    }
    println!("{:>5}  {:<28} {:>12} {:>5}", "ID", "NAME", "VALUE", "CLASS");
    for e in entries {
        let class = format!("{:?}", e.category);
        println!(
            "{:>5}  {:<28} {:>12.2} {class:>5}",
            e.product_id, e.name, e.value
        );
    }
}

pub fn forecast(forecast: &Forecast) {
    if let Forecast::Unavailable { error } = forecast {
        println!("No forecast: {error}");
        return;
    }
    println!("{:<10} {:>9}", "DATE", "DEMAND");
    for (date, quantity) in forecast.points() {
        println!("{date:<10} {quantity:>9.1}");
    }
}

pub fn simulation(order: &SimulatedOrder) -> String {
    match (order.order_id, &order.product, order.quantity) {
        (Some(id), Some(product), Some(quantity)) => {
            format!("{}: order {id}, {quantity} x {product}", order.message)
        }
        _ => order.message.clone(),
    }
}
