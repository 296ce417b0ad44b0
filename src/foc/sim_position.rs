//! 模擬位置ソース
//!
//! 指令された電気角速度を積分して合成角度を生成します。推定器が
//! まだロックしていない始動ランプと、学習スイープの強制回転で
//! 実位置ソースの代わりに使用されます。

use crate::foc::trig::{wrap_angle, ElectricalAngle};
use crate::interface::PositionSensor;

pub struct SimulatedPosition {
    dt: f32,
    pole_pairs: u8,
    /// 電気角 [rad]、[0, 2π)に正規化
    angle: f32,
    /// 電気角速度 [rad/s]
    velocity: f32,
}

impl SimulatedPosition {
    /// # 引数
    /// * `dt` - 制御周期 [s]
    /// * `pole_pairs` - 極対数（機械角速度の換算用）
    pub fn new(dt: f32, pole_pairs: u8) -> Self {
        Self {
            dt,
            pole_pairs,
            angle: 0.0,
            velocity: 0.0,
        }
    }

    /// 合成角度を`ticks`制御周期ぶん進める
    pub fn advance(&mut self, ticks: f32) {
        self.angle = wrap_angle(self.angle + self.velocity * self.dt * ticks);
    }

    pub fn set_electrical_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }
}

impl PositionSensor for SimulatedPosition {
    fn update(&mut self) {
        self.advance(1.0);
    }

    fn phase_adjusted_angle(&self, fraction: f32) -> ElectricalAngle {
        ElectricalAngle::from_radians(self.angle + self.velocity * self.dt * fraction)
    }

    // 合成角度は定義上つねに自分自身に追従している
    fn is_tracking(&self) -> bool {
        true
    }

    fn electrical_velocity(&self) -> f32 {
        self.velocity
    }

    fn mechanical_velocity(&self) -> f32 {
        self.velocity / self.pole_pairs as f32
    }
}
