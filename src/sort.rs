//! 快速排序
//!
//! 确定性版本以首元素为枢轴，随机版本随机选取枢轴并三路划分。
//! 两者都返回新的有序向量，不修改输入。

use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

/// 确定性快速排序（首元素为枢轴）
///
/// 对已排序输入退化为 O(n²)。用显式任务栈代替递归，划分在处理时被消耗，
/// 待处理的元素总数不超过 n。
pub fn quicksort_deterministic<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    enum Task<T> {
        Sort(Vec<T>),
        Emit(T),
    }

    let mut sorted = Vec::with_capacity(items.len());
    let mut tasks = vec![Task::Sort(items.to_vec())];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Emit(item) => sorted.push(item),
            Task::Sort(part) => {
                let mut part = part.into_iter();
                let Some(pivot) = part.next() else {
                    continue;
                };
                let (less, greater): (Vec<T>, Vec<T>) = part.partition(|x| *x < pivot);

                // 后进先出：less、枢轴、greater
                tasks.push(Task::Sort(greater));
                tasks.push(Task::Emit(pivot));
                tasks.push(Task::Sort(less));
            }
        }
    }

    sorted
}

/// 随机枢轴快速排序（三路划分）
pub fn quicksort_random<T: Ord + Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let Some(pivot) = items.choose(rng) else {
        return Vec::new();
    };

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for item in items {
        match item.cmp(pivot) {
            std::cmp::Ordering::Less => less.push(item.clone()),
            std::cmp::Ordering::Equal => equal.push(item.clone()),
            std::cmp::Ordering::Greater => greater.push(item.clone()),
        }
    }

    let mut sorted = quicksort_random(&less, rng);
    sorted.extend(equal);
    sorted.extend(quicksort_random(&greater, rng));
    sorted
}

/// 执行并计时
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
