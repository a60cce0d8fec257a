//! 旅行商问题
//!
//! 最近邻启发式（近似）与固定起点的全排列穷举（精确）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 一条回路
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// 城市序列，首尾相同
    pub cities: Vec<usize>,
    /// 总距离
    pub length: f64,
}

impl Tour {
    fn empty() -> Self {
        Self {
            cities: Vec::new(),
            length: 0.0,
        }
    }
}

fn check_square(matrix: &[Vec<f64>]) -> Result<()> {
    let n = matrix.len();
    match matrix.iter().position(|row| row.len() != n) {
        Some(i) => Err(Error::InvalidInput(format!(
            "距离矩阵必须为方阵: 第 {} 行有 {} 列, 期望 {}",
            i,
            matrix[i].len(),
            n
        ))),
        None => Ok(()),
    }
}

fn tour_length(matrix: &[Vec<f64>], cities: &[usize]) -> f64 {
    cities.windows(2).map(|w| matrix[w[0]][w[1]]).sum()
}

/// 最近邻启发式：每次走向最近的未访问城市，最后回到起点
pub fn nearest_neighbor(matrix: &[Vec<f64>], start: usize) -> Result<Tour> {
    check_square(matrix)?;
    let n = matrix.len();
    if n == 0 {
        return Ok(Tour::empty());
    }
    if start >= n {
        return Err(Error::InvalidInput(format!(
            "起点 {} 超出城市数量 {}",
            start, n
        )));
    }

    let mut visited = vec![false; n];
    let mut cities = vec![start];
    let mut length = 0.0;
    let mut current = start;
    visited[current] = true;

    for _ in 1..n {
        let nearest = (0..n)
            .filter(|&i| !visited[i])
            .min_by(|&a, &b| matrix[current][a].total_cmp(&matrix[current][b]));

        if let Some(next) = nearest {
            length += matrix[current][next];
            visited[next] = true;
            cities.push(next);
            current = next;
        }
    }

    length += matrix[current][start];
    cities.push(start);

    Ok(Tour { cities, length })
}

/// 穷举法：固定城市 0 为起点，枚举其余城市的全排列
pub fn brute_force(matrix: &[Vec<f64>]) -> Result<Tour> {
    check_square(matrix)?;
    let n = matrix.len();
    if n == 0 {
        return Ok(Tour::empty());
    }

    let mut order: Vec<usize> = (1..n).collect();
    let mut best: Option<Tour> = None;

    loop {
        let mut cities = Vec::with_capacity(n + 1);
        cities.push(0);
        cities.extend_from_slice(&order);
        cities.push(0);

        let length = tour_length(matrix, &cities);
        if best.as_ref().map_or(true, |b| length < b.length) {
            best = Some(Tour { cities, length });
        }

        if !next_permutation(&mut order) {
            break;
        }
    }

    Ok(best.unwrap_or_else(Tour::empty))
}

/// 字典序下一个排列，已是最后一个时返回 false
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}
