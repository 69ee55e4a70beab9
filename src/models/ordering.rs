//! 展示顺序规则
//!
//! 题目 / 选项 / 课时共用同一条排序规则：
//! 按 `(ordinal ?? 哨兵值, 原始位置)` 升序，即 ordinal 为空的排在所有
//! 有序条目之后，相同 ordinal 保持原始顺序（稳定排序）。

/// 无序条目的哨兵值
///
/// 取 u32::MAX 保证 ordinal 为空的条目严格排在任何有序条目之后
pub const UNORDERED_SENTINEL: u32 = u32::MAX;

/// 带展示顺序的条目
pub trait Ordered {
    fn ordinal(&self) -> Option<u32>;

    /// 参与排序的有效顺序值
    fn sort_ordinal(&self) -> u32 {
        self.ordinal().unwrap_or(UNORDERED_SENTINEL)
    }
}

/// 按展示顺序规则原地排序
pub fn sort_by_ordinal<T: Ordered>(items: &mut [T]) {
    // 稳定排序保证相同 ordinal 保持原始顺序
    items.sort_by_key(|item| item.sort_ordinal());
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        ordinal: Option<u32>,
    }

    impl Ordered for Item {
        fn ordinal(&self) -> Option<u32> {
            self.ordinal
        }
    }

    fn names(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn nulls_sort_last_even_after_large_ordinals() {
        let mut items = vec![
            Item { name: "none-1", ordinal: None },
            Item { name: "big", ordinal: Some(1500) },
            Item { name: "first", ordinal: Some(1) },
            Item { name: "none-2", ordinal: None },
            Item { name: "second", ordinal: Some(2) },
        ];
        sort_by_ordinal(&mut items);
        assert_eq!(names(&items), ["first", "second", "big", "none-1", "none-2"]);
    }

    #[test]
    fn ties_preserve_original_order() {
        let mut items = vec![
            Item { name: "a", ordinal: Some(5) },
            Item { name: "b", ordinal: Some(5) },
            Item { name: "c", ordinal: Some(5) },
            Item { name: "d", ordinal: Some(3) },
        ];
        sort_by_ordinal(&mut items);
        assert_eq!(names(&items), ["d", "a", "b", "c"]);
    }
}
