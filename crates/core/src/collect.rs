//! Cursor-driven pagination over a page-fetch capability.

use std::future::Future;

use crate::types::{ProductPage, ProductRecord};

/// The remote service caps product pages at this many records per call.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Walk a cursor-paginated product source to completion.
///
/// `fetch_page` is called with `(page_size, cursor)`, starting with no
/// cursor; pages are requested strictly sequentially since each request
/// depends on the previous page's `end_cursor`. `page_size` is clamped to
/// [`MAX_PAGE_SIZE`].
///
/// # Errors
///
/// Any fetch error aborts the whole collection and is returned as-is; no
/// partial list is produced and nothing is retried here. The operation is
/// not resumable at a cursor boundary - a fresh call restarts from the
/// beginning.
pub async fn collect_all<F, Fut, E>(
    mut fetch_page: F,
    page_size: i64,
) -> Result<Vec<ProductRecord>, E>
where
    F: FnMut(i64, Option<String>) -> Fut,
    Fut: Future<Output = Result<ProductPage, E>>,
{
    let page_size = page_size.min(MAX_PAGE_SIZE);
    let mut products = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(page_size, cursor.take()).await?;
        products.extend(page.products);
        if !page.page_info.has_next_page {
            break;
        }
        cursor = page.page_info.end_cursor;
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::ready;

    use super::*;
    use crate::types::PageInfo;

    fn record(id: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            handle: format!("product-{id}"),
            title: format!("Product {id}"),
            product_type: String::new(),
            tags: vec![],
            total_inventory: 0,
            metafields: vec![],
        }
    }

    fn page(ids: &[&str], end_cursor: Option<&str>) -> ProductPage {
        ProductPage {
            products: ids.iter().map(|id| record(id)).collect(),
            page_info: PageInfo {
                has_next_page: end_cursor.is_some(),
                end_cursor: end_cursor.map(String::from),
            },
        }
    }

    #[tokio::test]
    async fn fetches_exactly_until_last_page() {
        let pages = RefCell::new(VecDeque::from([
            page(&["1", "2"], Some("cursor-a")),
            page(&["3"], Some("cursor-b")),
            page(&["4"], None),
        ]));
        let calls = Cell::new(0_usize);
        let cursors = RefCell::new(Vec::new());

        let collected = collect_all(
            |_, cursor| {
                calls.set(calls.get() + 1);
                cursors.borrow_mut().push(cursor);
                ready(Ok::<_, String>(
                    pages.borrow_mut().pop_front().expect("ran past last page"),
                ))
            },
            50,
        )
        .await
        .expect("collection should succeed");

        assert_eq!(calls.get(), 3);
        let ids: Vec<_> = collected.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert_eq!(
            *cursors.borrow(),
            vec![
                None,
                Some("cursor-a".to_string()),
                Some("cursor-b".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn single_page_source_fetches_once() {
        let calls = Cell::new(0_usize);
        let collected = collect_all(
            |_, _| {
                calls.set(calls.get() + 1);
                ready(Ok::<_, String>(page(&["1"], None)))
            },
            MAX_PAGE_SIZE,
        )
        .await
        .expect("collection should succeed");

        assert_eq!(calls.get(), 1);
        assert_eq!(collected.len(), 1);
    }

    #[tokio::test]
    async fn clamps_page_size_to_remote_ceiling() {
        let seen = Cell::new(0_i64);
        let _ = collect_all(
            |size, _| {
                seen.set(size);
                ready(Ok::<_, String>(page(&[], None)))
            },
            1_000,
        )
        .await
        .expect("collection should succeed");

        assert_eq!(seen.get(), MAX_PAGE_SIZE);
    }

    #[tokio::test]
    async fn fetch_error_aborts_with_no_partial_result() {
        let pages = RefCell::new(VecDeque::from([page(&["1"], Some("cursor-a"))]));

        let result = collect_all(
            |_, cursor| {
                ready(match pages.borrow_mut().pop_front() {
                    Some(p) if cursor.is_none() => Ok(p),
                    _ => Err("boom".to_string()),
                })
            },
            50,
        )
        .await;

        assert_eq!(result, Err("boom".to_string()));
    }
}
