//! バス電圧安全ゲート
//!
//! バス電圧のヒステリシス判定で駆動許可フラグを管理します。
//! 電源の瞬時的な変動で許可/禁止が暴れないよう、禁止閾値と許可閾値の
//! 間の帯域では直前の状態を保持します。

use crate::config::gate;
use crate::fmt::*;

/// ゲートの閾値設定
#[derive(Debug, Clone, Copy)]
pub struct VoltageGateConfig {
    /// この電圧未満で駆動禁止 [V]
    pub disable_below: f32,
    /// この電圧超過で駆動許可 [V]
    pub enable_above: f32,
}

impl Default for VoltageGateConfig {
    fn default() -> Self {
        Self {
            disable_below: gate::DISABLE_BELOW_V,
            enable_above: gate::ENABLE_ABOVE_V,
        }
    }
}

/// ヒステリシス付き駆動許可ゲート
///
/// 初期状態は禁止。許可閾値を一度超えるまで駆動は開始されません。
pub struct VoltageGate {
    config: VoltageGateConfig,
    enabled: bool,
}

impl VoltageGate {
    pub fn new(config: VoltageGateConfig) -> Self {
        Self {
            config,
            enabled: false,
        }
    }

    /// バス電圧から許可フラグを更新して返す（毎周期呼ぶ）
    pub fn update(&mut self, vbus: f32) -> bool {
        if vbus < self.config.disable_below {
            if self.enabled {
                error!("Bus voltage low, drive disabled: {} V", vbus);
            }
            self.enabled = false;
        } else if vbus > self.config.enable_above {
            if !self.enabled {
                info!("Bus voltage ok, drive enabled: {} V", vbus);
            }
            self.enabled = true;
        }
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for VoltageGate {
    fn default() -> Self {
        Self::new(VoltageGateConfig::default())
    }
}
