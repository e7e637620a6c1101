//! 皮膚疾患カテゴリ定義
//!
//! システムプロンプトへの埋め込みと `/conditions` エンドポイントで共有する

use serde::Serialize;

/// カテゴリ内のサブグループ（例: 感染症 → 細菌性）
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConditionGroup {
    pub name: &'static str,
    pub conditions: &'static [&'static str],
}

/// 疾患カテゴリ
///
/// サブグループを持つカテゴリは `conditions` が空で、`subcategories` に疾患を持つ
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConditionCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub conditions: &'static [&'static str],
    pub subcategories: &'static [ConditionGroup],
}

pub const CONDITION_CATEGORIES: &[ConditionCategory] = &[
    ConditionCategory {
        id: "infectious",
        name: "Infectious",
        conditions: &[],
        subcategories: &[
            ConditionGroup {
                name: "Bacterial",
                conditions: &["Impetigo", "Cellulitis", "Folliculitis", "Boils"],
            },
            ConditionGroup {
                name: "Viral",
                conditions: &["Warts", "Herpes", "Shingles"],
            },
            ConditionGroup {
                name: "Fungal",
                conditions: &["Ringworm", "Athlete's Foot", "Nail Fungus"],
            },
            ConditionGroup {
                name: "Parasitic",
                conditions: &["Scabies"],
            },
        ],
    },
    ConditionCategory {
        id: "inflammatory-allergic",
        name: "Inflammatory & Allergic",
        conditions: &[
            "Eczema",
            "Contact Dermatitis",
            "Psoriasis",
            "Urticaria",
            "Lichen Planus",
        ],
        subcategories: &[],
    },
    ConditionCategory {
        id: "acne-sebaceous",
        name: "Acne & Sebaceous",
        conditions: &["Acne Vulgaris", "Acne Rosacea", "Sebaceous Cyst"],
        subcategories: &[],
    },
    ConditionCategory {
        id: "pigmentation",
        name: "Pigmentation",
        conditions: &["Vitiligo", "Melasma", "Hyperpigmentation"],
        subcategories: &[],
    },
    ConditionCategory {
        id: "autoimmune",
        name: "Autoimmune",
        conditions: &["Lupus", "Pemphigus", "Alopecia Areata"],
        subcategories: &[],
    },
    ConditionCategory {
        id: "hair-scalp",
        name: "Hair & Scalp",
        conditions: &["Alopecia", "Dandruff", "Scalp Psoriasis"],
        subcategories: &[],
    },
    ConditionCategory {
        id: "nail-disorders",
        name: "Nail Disorders",
        conditions: &["Nail Fungus", "Ingrown Nail", "Nail Psoriasis"],
        subcategories: &[],
    },
    ConditionCategory {
        id: "skin-cancers",
        name: "Skin Cancers",
        conditions: &[
            "Basal Cell Carcinoma",
            "Squamous Cell Carcinoma",
            "Melanoma",
        ],
        subcategories: &[],
    },
    ConditionCategory {
        id: "other",
        name: "Other",
        conditions: &["Sunburn", "Burns", "Stretch Marks", "Keloids"],
        subcategories: &[],
    },
];

impl ConditionCategory {
    /// プロンプト用の1行表現
    ///
    /// 例: `INFECTIOUS: Bacterial (Impetigo, Cellulitis), Viral (Warts)`
    pub fn render(&self) -> String {
        let body = if self.subcategories.is_empty() {
            self.conditions.join(", ")
        } else {
            self.subcategories
                .iter()
                .map(|g| format!("{} ({})", g.name, g.conditions.join(", ")))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{}: {}", self.name.to_uppercase(), body)
    }
}

/// 番号付きの一覧をプロンプト用に生成
pub fn render_taxonomy() -> String {
    CONDITION_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.render()))
        .collect::<Vec<_>>()
        .join("\n")
}
