//! Page requests parsed from `page`/`size`/`sort` query parameters, and the
//! `X-Total-Count` / `Link` headers returned with every list.

use crate::domain::EntityDescriptor;
use crate::error::AppError;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    /// Parse query pairs. Unparseable `page`/`size` fall back to defaults; sort
    /// properties not declared by `entity` are rejected.
    pub fn from_query(params: &[(String, String)], entity: &EntityDescriptor) -> Result<Self, AppError> {
        let mut req = PageRequest::default();
        for (k, v) in params {
            match k.as_str() {
                "page" => {
                    req.page = v.parse().unwrap_or(0);
                }
                "size" => {
                    req.size = v
                        .parse::<u32>()
                        .map(|n| n.clamp(1, MAX_PAGE_SIZE))
                        .unwrap_or(DEFAULT_PAGE_SIZE);
                }
                "sort" => req.sort.extend(parse_sort(v, entity)?),
                _ => {}
            }
        }
        Ok(req)
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// `a,b,desc` → a DESC, b DESC. A trailing `asc`/`desc` applies to every listed property.
fn parse_sort(value: &str, entity: &EntityDescriptor) -> Result<Vec<SortOrder>, AppError> {
    let mut parts: Vec<&str> = value.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    let direction = match parts.last().and_then(|p| Direction::parse(p)) {
        Some(d) => {
            parts.pop();
            d
        }
        None => Direction::Asc,
    };
    parts
        .into_iter()
        .map(|property| {
            if !entity.has_property(property) {
                return Err(AppError::BadRequest {
                    entity: entity.entity_name,
                    error_key: "sort",
                    message: format!("No property {} found for type {}", property, entity.entity_name),
                });
            }
            Ok(SortOrder {
                property: property.to_string(),
                direction,
            })
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Page {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(self.size as u64)
    }
}

fn page_uri(base_url: &str, page: u64, size: u32) -> String {
    format!("{}?page={}&size={}", base_url, page, size)
}

/// `X-Total-Count` plus a `Link` header with next/prev/last/first relations.
pub fn pagination_headers<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_elements));

    let number = page.page as u64;
    let total_pages = page.total_pages();
    let mut links = Vec::new();
    if number + 1 < total_pages {
        links.push(format!("<{}>; rel=\"next\"", page_uri(base_url, number + 1, page.size)));
    }
    if number > 0 {
        links.push(format!("<{}>; rel=\"prev\"", page_uri(base_url, number - 1, page.size)));
    }
    let last = total_pages.saturating_sub(1);
    links.push(format!("<{}>; rel=\"last\"", page_uri(base_url, last, page.size)));
    links.push(format!("<{}>; rel=\"first\"", page_uri(base_url, 0, page.size)));

    match HeaderValue::from_str(&links.join(",")) {
        Ok(v) => {
            headers.insert(axum::http::header::LINK, v);
        }
        Err(_) => tracing::warn!(base_url, "pagination link header is not valid ASCII"),
    }
    headers
}
