// ==========================================
// 制造数据平台 - 生产报表 API
// ==========================================
// 职责: 固定口径报表的对外入口（入参校验 + 查询编排 + 舍入）
// 口径红线: 先除后舍入; 小时保留 2 位, 比率保留 4 位
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{validate_month, validate_ts};
use crate::engine::{round2, round4, UtilizationEngine};
use crate::report::models::{
    MachineUtilization, MonthlyProductOutput, PendingWorkOrder, ProductSummary, ScrapByMachine,
    ScrapByProduct, SimpleMachineUtilization, WipOrder,
};
use crate::report::ReportRepository;
use crate::repository::{
    DowntimeRepository, MachineRepository, OperationRepository, ProductRepository,
};

// ==========================================
// ReportApi - 生产报表 API
// ==========================================

/// 生产报表API
///
/// 职责：
/// 1. 月度产品产出 / 在制工单 / 无产出工单
/// 2. 机台稼动率（简单口径与停机调整口径）
/// 3. 废品驱动分析（按产品 / 按机台）
/// 4. 产品区间汇总
pub struct ReportApi {
    report_repo: Arc<ReportRepository>,
    product_repo: Arc<ProductRepository>,
    operation_repo: Arc<OperationRepository>,
    downtime_repo: Arc<DowntimeRepository>,
    machine_repo: Arc<MachineRepository>,
    engine: UtilizationEngine,
}

impl ReportApi {
    /// 创建新的ReportApi实例
    pub fn new(
        report_repo: Arc<ReportRepository>,
        product_repo: Arc<ProductRepository>,
        operation_repo: Arc<OperationRepository>,
        downtime_repo: Arc<DowntimeRepository>,
        machine_repo: Arc<MachineRepository>,
    ) -> Self {
        Self {
            report_repo,
            product_repo,
            operation_repo,
            downtime_repo,
            machine_repo,
            engine: UtilizationEngine::new(),
        }
    }

    /// 月度产品产出报表
    ///
    /// # 参数
    /// - month: 月份 'YYYY-MM'
    ///
    /// # 返回
    /// - Ok(Vec<MonthlyProductOutput>): 按产品名排序; 当月无报工的产品不出现
    /// - Err(ApiError): 月份格式错误或数据库错误
    pub fn product_output_by_month(&self, month: &str) -> ApiResult<Vec<MonthlyProductOutput>> {
        validate_month(month)?;

        debug!(month = month, "查询月度产品产出");
        let rows = self.report_repo.monthly_product_output(month)?;
        Ok(rows)
    }

    /// 在制工单报表
    ///
    /// 口径: status='in_progress', 或参考时点落在计划窗口内且状态未终结
    ///
    /// # 参数
    /// - now_ts: 参考时点 'YYYY-MM-DDTHH:MM:SSZ'
    pub fn wip_orders(&self, now_ts: &str) -> ApiResult<Vec<WipOrder>> {
        validate_ts("now_ts", now_ts)?;

        debug!(now_ts = now_ts, "查询在制工单");
        let rows = self.report_repo.wip_orders(now_ts)?;
        Ok(rows)
    }

    /// 机台稼动率（简单口径, 纯 SQL 运行时长）
    ///
    /// utilization = runtime / total; 不扣减停机, 调整口径见 machine_utilization
    ///
    /// # 参数
    /// - start_ts / end_ts: 区间端点 'YYYY-MM-DDTHH:MM:SSZ'
    ///
    /// # 返回
    /// - Ok(Vec<SimpleMachineUtilization>): 按机台 id 排序, 含无报工机台
    pub fn machine_utilization_simple(
        &self,
        start_ts: &str,
        end_ts: &str,
    ) -> ApiResult<Vec<SimpleMachineUtilization>> {
        let start = validate_ts("start_ts", start_ts)?;
        let end = validate_ts("end_ts", end_ts)?;

        let total_hours = self.engine.total_hours_in_range(&start, &end);
        let rows = self.report_repo.machine_runtime_hours(start_ts, end_ts)?;

        debug!(
            start_ts = start_ts,
            end_ts = end_ts,
            total_hours = total_hours,
            machines = rows.len(),
            "计算简单口径稼动率"
        );

        let result = rows
            .into_iter()
            .map(|row| {
                let utilization = self.engine.utilization(row.runtime_hours, total_hours);
                SimpleMachineUtilization {
                    machine_id: row.machine_id,
                    machine_name: row.machine_name,
                    runtime_hours: round2(row.runtime_hours),
                    total_hours: round2(total_hours),
                    utilization: round4(utilization),
                }
            })
            .collect();

        Ok(result)
    }

    /// 机台稼动率（可选停机调整口径）
    ///
    /// - adjusted=false: available = 区间总时长
    /// - adjusted=true : available = max(0, 区间总时长 - 停机时长)
    ///
    /// # 参数
    /// - start_ts / end_ts: 区间端点 'YYYY-MM-DDTHH:MM:SSZ'
    /// - adjusted: 是否扣减停机
    pub fn machine_utilization(
        &self,
        start_ts: &str,
        end_ts: &str,
        adjusted: bool,
    ) -> ApiResult<Vec<MachineUtilization>> {
        let start = validate_ts("start_ts", start_ts)?;
        let end = validate_ts("end_ts", end_ts)?;

        let total_hours = self.engine.total_hours_in_range(&start, &end);
        let machines = self.machine_repo.list_all()?;

        debug!(
            start_ts = start_ts,
            end_ts = end_ts,
            adjusted = adjusted,
            machines = machines.len(),
            "计算机台稼动率"
        );

        let mut result = Vec::with_capacity(machines.len());
        for machine in machines {
            let ops = self
                .operation_repo
                .list_for_machine_in_range(machine.id, start_ts, end_ts)?;
            let runtime_hours = self.engine.runtime_hours(&ops);

            let (downtime_hours, available_hours) = if adjusted {
                let events = self
                    .downtime_repo
                    .list_for_machine_in_range(machine.id, start_ts, end_ts)?;
                let downtime = self.engine.downtime_hours(&events);
                (downtime, self.engine.available_hours(total_hours, downtime))
            } else {
                (0.0, total_hours)
            };

            let utilization = self.engine.utilization(runtime_hours, available_hours);

            result.push(MachineUtilization {
                machine_id: machine.id,
                machine_name: machine.name,
                runtime_hours: round2(runtime_hours),
                available_hours: round2(available_hours),
                downtime_hours: round2(downtime_hours),
                utilization: round4(utilization),
            });
        }

        Ok(result)
    }

    /// 无产出工单报表: 已下发/已计划/延期/生产中, 但尚无任何报工
    pub fn work_orders_no_production(&self) -> ApiResult<Vec<PendingWorkOrder>> {
        let rows = self.report_repo.work_orders_no_production()?;
        Ok(rows)
    }

    /// 废品驱动分析（按产品, 废品量降序）
    pub fn top_scrap_by_product(
        &self,
        start_ts: &str,
        end_ts: &str,
    ) -> ApiResult<Vec<ScrapByProduct>> {
        validate_ts("start_ts", start_ts)?;
        validate_ts("end_ts", end_ts)?;

        let rows = self.report_repo.top_scrap_by_product(start_ts, end_ts)?;
        Ok(rows)
    }

    /// 废品驱动分析（按机台, 废品量降序）
    pub fn top_scrap_by_machine(
        &self,
        start_ts: &str,
        end_ts: &str,
    ) -> ApiResult<Vec<ScrapByMachine>> {
        validate_ts("start_ts", start_ts)?;
        validate_ts("end_ts", end_ts)?;

        let rows = self.report_repo.top_scrap_by_machine(start_ts, end_ts)?;
        Ok(rows)
    }

    /// 产品区间汇总: 按产品名汇总区间内良品/废品与涉及工单数
    ///
    /// # 参数
    /// - product_name: 产品名称（精确匹配）
    /// - start_ts / end_ts: 区间端点 'YYYY-MM-DDTHH:MM:SSZ'
    ///
    /// # 返回
    /// - Ok(ProductSummary): 汇总结果（区间内无报工时数量为 0）
    /// - Err(ApiError::NotFound): 产品不存在
    pub fn product_summary(
        &self,
        product_name: &str,
        start_ts: &str,
        end_ts: &str,
    ) -> ApiResult<ProductSummary> {
        if product_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("产品名称不能为空".to_string()));
        }
        validate_ts("start_ts", start_ts)?;
        validate_ts("end_ts", end_ts)?;

        let product = self
            .product_repo
            .find_by_name(product_name)?
            .ok_or_else(|| ApiError::NotFound(format!("产品 '{}' 不存在", product_name)))?;

        let (good_qty, scrap_qty) =
            self.operation_repo
                .totals_for_product_in_range(product.id, start_ts, end_ts)?;
        let num_orders =
            self.operation_repo
                .count_orders_for_product_in_range(product.id, start_ts, end_ts)?;

        debug!(
            product_id = product.id,
            good_qty = good_qty,
            scrap_qty = scrap_qty,
            num_orders = num_orders,
            "产品区间汇总"
        );

        Ok(ProductSummary {
            product_id: product.id,
            product_name: product.name,
            good_qty,
            scrap_qty,
            num_orders,
        })
    }
}
