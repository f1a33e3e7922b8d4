/// Pages needed for `total` rows, never fewer than one.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(u64::from(page_size)).max(1)
}
