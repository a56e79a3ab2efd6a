//! Fixed descriptive text for every method the recommender can propose.

use empirica_model::MethodRecommendation;

/// Static description of one method.
#[derive(Debug, Clone, Copy)]
pub struct MethodText {
    pub name: &'static str,
    pub description: &'static str,
    pub advantages: &'static [&'static str],
    pub considerations: &'static [&'static str],
    pub assumptions: &'static [&'static str],
    pub test_methods: &'static [&'static str],
    pub formula: &'static str,
    pub suitable_conditions: &'static [&'static str],
    pub suitable_scenarios: &'static [&'static str],
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl MethodText {
    pub fn recommend(&self, confidence: f64) -> MethodRecommendation {
        MethodRecommendation {
            name: self.name.to_string(),
            description: self.description.to_string(),
            advantages: owned(self.advantages),
            considerations: owned(self.considerations),
            assumptions: owned(self.assumptions),
            test_methods: owned(self.test_methods),
            formula: self.formula.to_string(),
            suitable_conditions: owned(self.suitable_conditions),
            suitable_scenarios: owned(self.suitable_scenarios),
            confidence,
        }
    }
}

pub const FIXED_EFFECTS: MethodText = MethodText {
    name: "固定效应模型",
    description: "控制个体层面不随时间变化的不可观测异质性，识别变量在个体内部随时间变化的效应。",
    advantages: &[
        "消除不随时间变化的遗漏变量偏误",
        "允许个体效应与解释变量相关",
    ],
    considerations: &[
        "无法估计不随时间变化变量的系数",
        "时间维度较短时自由度损失较大",
    ],
    assumptions: &[
        "严格外生性：误差项与各期解释变量不相关",
        "个体效应不随时间变化",
        "误差项无序列相关或使用聚类稳健标准误",
    ],
    test_methods: &["F检验（个体效应显著性）", "Hausman检验", "组间异方差检验"],
    formula: "y_it = α_i + β·x_it + γ·controls_it + ε_it",
    suitable_conditions: &[
        "面板数据，同一个体被多期观测",
        "个体异质性可能与解释变量相关",
    ],
    suitable_scenarios: &["企业绩效影响因素研究", "地区政策效果评估"],
};

pub const RANDOM_EFFECTS: MethodText = MethodText {
    name: "随机效应模型",
    description: "将个体效应视为随机扰动的一部分，同时利用个体间与个体内变异进行估计。",
    advantages: &[
        "可以估计不随时间变化变量的系数",
        "在假设成立时估计更有效",
    ],
    considerations: &[
        "个体效应与解释变量相关时估计有偏",
        "需通过Hausman检验与固定效应模型比较",
    ],
    assumptions: &[
        "个体效应与解释变量不相关",
        "个体效应服从独立同分布",
        "误差项同方差且无序列相关",
    ],
    test_methods: &["Breusch-Pagan LM检验", "Hausman检验"],
    formula: "y_it = α + β·x_it + γ·controls_it + u_i + ε_it",
    suitable_conditions: &[
        "面板数据，个体为总体的随机抽样",
        "关注不随时间变化的解释变量",
    ],
    suitable_scenarios: &["家庭或个人追踪调查数据分析"],
};

pub const OLS: MethodText = MethodText {
    name: "普通最小二乘法（OLS）",
    description: "通过最小化残差平方和估计线性回归系数，是截面数据分析的基准方法。",
    advantages: &["估计简单、结果易于解释", "满足经典假设时为最优线性无偏估计"],
    considerations: &[
        "存在内生性时估计有偏",
        "异方差时需使用稳健标准误",
    ],
    assumptions: &[
        "线性关系",
        "误差项均值为零且与解释变量不相关",
        "无完全多重共线性",
        "误差项同方差",
    ],
    test_methods: &["White异方差检验", "VIF多重共线性检验", "残差正态性检验"],
    formula: "y_i = β0 + β1·x_i + γ·controls_i + ε_i",
    suitable_conditions: &["截面数据", "解释变量外生"],
    suitable_scenarios: &["横截面影响因素分析", "基准回归"],
};

pub const TWO_STAGE_LEAST_SQUARES: MethodText = MethodText {
    name: "两阶段最小二乘法（2SLS）",
    description: "利用工具变量分离解释变量的外生变异，缓解遗漏变量、测量误差与反向因果导致的内生性问题。",
    advantages: &["处理内生性问题", "在工具变量有效时得到一致估计"],
    considerations: &[
        "弱工具变量会导致严重偏误",
        "工具变量外生性难以直接检验",
    ],
    assumptions: &[
        "相关性：工具变量与内生解释变量相关",
        "外生性：工具变量与误差项不相关",
        "排他性：工具变量仅通过内生变量影响被解释变量",
    ],
    test_methods: &[
        "第一阶段F统计量（弱工具变量检验）",
        "Sargan/Hansen过度识别检验",
        "Durbin-Wu-Hausman内生性检验",
    ],
    formula: "第一阶段：x_i = π0 + π1·z_i + υ_i；第二阶段：y_i = β0 + β1·x̂_i + ε_i",
    suitable_conditions: &["存在可信的工具变量", "核心解释变量疑似内生"],
    suitable_scenarios: &["政策或制度变量的因果效应识别"],
};

pub const TIME_SERIES: MethodText = MethodText {
    name: "时间序列分析（ARIMA）",
    description: "对单一对象随时间变化的序列建模，刻画趋势、自相关与动态关系。",
    advantages: &["刻画序列的动态结构", "适用于预测"],
    considerations: &[
        "非平稳序列需差分或协整处理",
        "样本期较短时估计不稳定",
    ],
    assumptions: &[
        "序列平稳或经差分后平稳",
        "残差为白噪声",
    ],
    test_methods: &["ADF单位根检验", "Ljung-Box自相关检验", "AIC/BIC阶数选择"],
    formula: "Δ^d y_t = c + Σ φ_i·Δ^d y_{t−i} + Σ θ_j·ε_{t−j} + ε_t",
    suitable_conditions: &["时间序列数据", "观测期数较多"],
    suitable_scenarios: &["宏观经济指标分析与预测"],
};

pub const MEDIATION: MethodText = MethodText {
    name: "中介效应分析",
    description: "检验解释变量是否通过中介变量影响被解释变量，并分解直接效应与间接效应。",
    advantages: &["揭示作用机制", "区分直接效应与间接效应"],
    considerations: &["中介变量本身可能内生", "逐步回归法检验效力较低"],
    assumptions: &["因果顺序明确", "中介变量与被解释变量之间无遗漏混杂"],
    test_methods: &["逐步回归法", "Sobel检验", "Bootstrap间接效应置信区间"],
    formula: "M = a·X + e1；Y = c'·X + b·M + e2；间接效应 = a·b",
    suitable_conditions: &["已指定中介变量"],
    suitable_scenarios: &["机制检验"],
};

pub const MODERATION: MethodText = MethodText {
    name: "调节效应分析",
    description: "通过交互项检验调节变量是否改变解释变量对被解释变量的影响强度或方向。",
    advantages: &["识别效应的边界条件", "实现简单"],
    considerations: &["交互项可能带来多重共线性，建议中心化", "需报告简单斜率"],
    assumptions: &["调节变量外生", "交互效应为线性"],
    test_methods: &["交互项显著性检验", "简单斜率分析"],
    formula: "Y = β0 + β1·X + β2·W + β3·X·W + ε",
    suitable_conditions: &["已指定调节变量"],
    suitable_scenarios: &["情境因素对主效应的影响"],
};

pub const HETEROGENEITY: MethodText = MethodText {
    name: "异质性分析",
    description: "按分组变量拆分样本分别回归，比较不同组别中核心解释变量的效应差异。",
    advantages: &["揭示效应在不同群体间的差异", "结果直观"],
    considerations: &["分组后样本量减少", "组间系数差异需正式检验"],
    assumptions: &["分组变量外生", "各组模型设定一致"],
    test_methods: &["Chow检验", "似无相关回归（SUR）组间系数差异检验"],
    formula: "Y_g = β0_g + β1_g·X_g + ε_g，g ∈ 分组",
    suitable_conditions: &["已指定分组变量"],
    suitable_scenarios: &["地区、行业或所有制差异分析"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_copies_all_text() {
        let rec = OLS.recommend(0.8);
        assert_eq!(rec.name, "普通最小二乘法（OLS）");
        assert_eq!(rec.assumptions.len(), OLS.assumptions.len());
        assert_eq!(rec.confidence, 0.8);
    }
}
