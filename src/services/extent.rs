//! 范围校准服务 - 业务能力层
//!
//! 由全部题目坐标的外包矩形宽度计算"足够接近"的判定半径。

use crate::models::Position;

/// 判定半径上限（与坐标同单位）
pub const MAX_TOLERANCE_RADIUS: f64 = 100.0;

/// 轴对齐外包矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingExtent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingExtent {
    /// 计算一组坐标的外包矩形，坐标为空时返回 None
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        positions.into_iter().fold(None, |extent, p| {
            Some(match extent {
                None => Self {
                    xmin: p.x,
                    ymin: p.y,
                    xmax: p.x,
                    ymax: p.y,
                },
                Some(e) => Self {
                    xmin: e.xmin.min(p.x),
                    ymin: e.ymin.min(p.y),
                    xmax: e.xmax.max(p.x),
                    ymax: e.ymax.max(p.y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// 计算判定半径：`min(外包矩形宽度, 100)`
///
/// 只取宽度，不看高度。所有题目重合时宽度为 0，
/// 此时必须精确点中目标点才算答对。
pub fn calibrate_tolerance<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<f64> {
    BoundingExtent::from_positions(positions).map(|extent| extent.width().min(MAX_TOLERANCE_RADIUS))
}

/// 点击位置与目标的距离不超过判定半径即视为答对
pub fn is_within_tolerance(click: &Position, target: &Position, tolerance_radius: f64) -> bool {
    click.distance_to(target) <= tolerance_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(points: &[(f64, f64)]) -> Vec<Position> {
        points.iter().map(|(x, y)| Position::new(*x, *y)).collect()
    }

    #[test]
    fn test_wide_extent_is_clamped() {
        let points = positions(&[(0.0, 0.0), (250.0, 3.0), (120.0, -8.0)]);

        assert_eq!(calibrate_tolerance(&points), Some(100.0));
    }

    #[test]
    fn test_narrow_extent_uses_width() {
        let points = positions(&[(10.0, 0.0), (50.0, 0.0), (30.0, 0.0)]);

        assert_eq!(calibrate_tolerance(&points), Some(40.0));
    }

    #[test]
    fn test_height_is_ignored() {
        let points = positions(&[(0.0, 0.0), (5.0, 900.0)]);
        let extent = BoundingExtent::from_positions(&points).unwrap();

        assert_eq!(extent.height(), 900.0);
        assert_eq!(calibrate_tolerance(&points), Some(5.0));
    }

    #[test]
    fn test_degenerate_extent_gives_zero() {
        let points = positions(&[(5.0, 5.0)]);
        let tolerance = calibrate_tolerance(&points).unwrap();

        assert_eq!(tolerance, 0.0);
        assert!(is_within_tolerance(&Position::new(5.0, 5.0), &points[0], tolerance));
        assert!(!is_within_tolerance(&Position::new(5.0001, 5.0), &points[0], tolerance));
    }

    #[test]
    fn test_empty_positions() {
        assert_eq!(calibrate_tolerance(&Vec::<Position>::new()), None);
    }

    #[test]
    fn test_within_tolerance_boundary() {
        let target = Position::new(0.0, 0.0);

        assert!(is_within_tolerance(&Position::new(1.0, 1.0), &target, 5.0));
        assert!(is_within_tolerance(&Position::new(3.0, 4.0), &target, 5.0));
        assert!(!is_within_tolerance(&Position::new(3.0, 4.1), &target, 5.0));
    }
}
