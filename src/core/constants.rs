// Player base stats (before talents)
pub const BASE_PLAYER_ATTACK: u32 = 20;
pub const BASE_PLAYER_DEFENSE: u32 = 10;
pub const BASE_PLAYER_MAX_HP: u32 = 100;

// Enemy baseline at run start
pub const BASE_ENEMY_MAX_HP: u32 = 50;
pub const BASE_ENEMY_ATTACK: u32 = 5;
pub const BASE_ENEMY_DEFENSE: u32 = 0;

// Enemy scaling after normal defeats
pub const ENEMY_HP_GROWTH_PER_DEFEAT: u32 = 5;
pub const ENEMY_STAT_STEP_INTERVAL: u32 = 5;
pub const ENEMY_ATTACK_STEP: u32 = 4;
pub const ENEMY_DEFENSE_STEP: u32 = 5;

// Boss cadence
pub const DEFEATS_PER_BOSS: u32 = 10;
pub const BOSS_STAT_MULTIPLIER: u32 = 2;
pub const BOSS_WINS_TO_COMPLETE: u32 = 10;

// Class multipliers
pub const LUCKY_CRIT_MULTIPLIER: f64 = 1.5;
pub const LUCKY_CRIT_CHANCE: f64 = 0.5;
pub const CHARGE_BURST_MULTIPLIER: f64 = 2.5;
pub const CHARGE_BURST_INTERVAL: u32 = 4;
pub const HEALER_BASE_MULTIPLIER: f64 = 0.5;
pub const HEALER_HEAL_DIVISOR: u32 = 2;

// Minimum damage for any landed hit
pub const MIN_DAMAGE: u32 = 1;

// Post-victory upgrades: (normal, boss)
pub const UPGRADE_ATTACK_GAIN: (u32, u32) = (5, 10);
pub const UPGRADE_DEFENSE_GAIN: (u32, u32) = (3, 6);
pub const UPGRADE_MAX_HP_GAIN: (u32, u32) = (20, 40);
pub const UPGRADE_HEAL_GAIN: (u32, u32) = (30, 60);

// Token reward
pub const BASE_TOKEN_STANDARD: f64 = 1.0;
pub const TOKEN_STANDARD_BOSS_FACTOR: f64 = 2.0;

// Talent caps
pub const TALENT_MAX_LEVEL: u32 = 5;
pub const SHIELD_TALENT_MAX_LEVEL: u32 = 100;

// Talent effects
pub const TALENT_ATTACK_PER_LEVEL: u32 = 5;
pub const TALENT_ATTACK_CAPSTONE: u32 = 25;
pub const TALENT_DEFENSE_PER_LEVEL: u32 = 5;
pub const TALENT_DEFENSE_CAPSTONE: u32 = 25;
pub const TALENT_MAX_HP_PER_LEVEL: u32 = 10;
pub const TALENT_MAX_HP_CAPSTONE: u32 = 50;
pub const TALENT_PASSIVE_PER_LEVEL: f64 = 0.1;
pub const TALENT_PASSIVE_CAPSTONE: f64 = 0.25;
pub const TALENT_PENETRATION_PER_LEVEL: f64 = 0.05;
pub const TALENT_SHIELD_PER_LEVEL: u32 = 5;

// Talent pricing
pub const TALENT_COSTS: [f64; 5] = [5.0, 10.0, 15.0, 20.0, 25.0];
pub const SHIELD_TALENT_BASE_COST: f64 = 20.0;
pub const SHIELD_TALENT_COST_STEP: f64 = 5.0;

// Float slack when comparing currency against a price
pub const CURRENCY_EPSILON: f64 = 1e-9;
