// ==========================================
// 制造数据平台 - 工单管理 API
// ==========================================
// 职责: 工单创建、报工录入、状态更新（入参校验 + 引用存在性检查）
// 红线: 校验在本层完成, 仓储层不重复校验
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_ts;
use crate::domain::types::WorkOrderStatus;
use crate::domain::{NewOperation, NewWorkOrder, Operation, WorkOrder};
use crate::repository::{
    MachineRepository, OperationRepository, ProductRepository, WorkOrderRepository,
};

// ==========================================
// WorkOrderApi - 工单管理 API
// ==========================================

/// 工单管理API
///
/// 职责：
/// 1. 创建工单（状态固定为 planned）
/// 2. 报工录入（生产操作记录）
/// 3. 工单状态更新与查询
pub struct WorkOrderApi {
    work_order_repo: Arc<WorkOrderRepository>,
    product_repo: Arc<ProductRepository>,
    machine_repo: Arc<MachineRepository>,
    operation_repo: Arc<OperationRepository>,
}

impl WorkOrderApi {
    /// 创建新的WorkOrderApi实例
    pub fn new(
        work_order_repo: Arc<WorkOrderRepository>,
        product_repo: Arc<ProductRepository>,
        machine_repo: Arc<MachineRepository>,
        operation_repo: Arc<OperationRepository>,
    ) -> Self {
        Self {
            work_order_repo,
            product_repo,
            machine_repo,
            operation_repo,
        }
    }

    /// 创建新工单（状态固定为 planned）
    ///
    /// # 参数
    /// - new_order: 工单创建入参
    ///
    /// # 校验
    /// - planned_qty > 0
    /// - planned_start / planned_end 为合法时间戳且 start < end
    /// - product_id 存在; machine_id（若提供）存在
    ///
    /// # 返回
    /// - Ok(i64): 新工单 id
    /// - Err(ApiError): 校验失败或数据库错误
    pub fn create_work_order(&self, new_order: &NewWorkOrder) -> ApiResult<i64> {
        // 参数验证
        if new_order.planned_qty <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "计划数量必须大于 0, 实际: {}",
                new_order.planned_qty
            )));
        }

        let start = validate_ts("planned_start", &new_order.planned_start)?;
        let end = validate_ts("planned_end", &new_order.planned_end)?;
        if start >= end {
            return Err(ApiError::InvalidInput(format!(
                "planned_start 必须早于 planned_end: {} >= {}",
                new_order.planned_start, new_order.planned_end
            )));
        }

        // 引用存在性检查
        if self.product_repo.find_by_id(new_order.product_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "产品 id={} 不存在",
                new_order.product_id
            )));
        }

        if let Some(machine_id) = new_order.machine_id {
            if self.machine_repo.find_by_id(machine_id)?.is_none() {
                return Err(ApiError::NotFound(format!("机台 id={} 不存在", machine_id)));
            }
        }

        let order_id = self.work_order_repo.insert(new_order)?;

        info!(
            order_id = order_id,
            product_id = new_order.product_id,
            planned_qty = new_order.planned_qty,
            "创建工单成功"
        );

        Ok(order_id)
    }

    /// 报工录入: 为工单插入一条生产操作记录
    ///
    /// # 校验
    /// - good_qty / scrap_qty >= 0
    /// - op_start / op_end 为合法时间戳且 start < end
    /// - work_order_id 与 machine_id 存在
    ///
    /// # 返回
    /// - Ok(i64): 新操作记录 id
    pub fn add_production_record(&self, new_op: &NewOperation) -> ApiResult<i64> {
        // 参数验证
        if new_op.good_qty < 0 || new_op.scrap_qty < 0 {
            return Err(ApiError::InvalidInput(format!(
                "良品数/废品数不能为负: good={}, scrap={}",
                new_op.good_qty, new_op.scrap_qty
            )));
        }

        let start = validate_ts("op_start", &new_op.op_start)?;
        let end = validate_ts("op_end", &new_op.op_end)?;
        if start >= end {
            return Err(ApiError::InvalidInput(format!(
                "op_start 必须早于 op_end: {} >= {}",
                new_op.op_start, new_op.op_end
            )));
        }

        // 引用存在性检查
        if self
            .work_order_repo
            .find_by_id(new_op.work_order_id)?
            .is_none()
        {
            return Err(ApiError::NotFound(format!(
                "工单 id={} 不存在",
                new_op.work_order_id
            )));
        }
        if self.machine_repo.find_by_id(new_op.machine_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "机台 id={} 不存在",
                new_op.machine_id
            )));
        }

        let op_id = self.operation_repo.insert(new_op)?;

        info!(
            op_id = op_id,
            work_order_id = new_op.work_order_id,
            machine_id = new_op.machine_id,
            good_qty = new_op.good_qty,
            scrap_qty = new_op.scrap_qty,
            "报工录入成功"
        );

        Ok(op_id)
    }

    /// 更新工单状态
    ///
    /// 状态集合固定但不强制状态机, 任意合法状态可随时写入
    ///
    /// # 参数
    /// - work_order_id: 工单 id
    /// - status: 目标状态字符串（planned/released/in_progress/completed/cancelled/delayed）
    pub fn update_status(&self, work_order_id: i64, status: &str) -> ApiResult<()> {
        let parsed = WorkOrderStatus::parse(status).ok_or_else(|| {
            ApiError::InvalidInput(format!("无效的工单状态: '{}'", status))
        })?;

        let affected = self.work_order_repo.update_status(work_order_id, parsed)?;
        if affected == 0 {
            return Err(ApiError::NotFound(format!(
                "工单 id={} 不存在",
                work_order_id
            )));
        }

        info!(
            order_id = work_order_id,
            status = %parsed,
            "更新工单状态成功"
        );

        Ok(())
    }

    /// 按 id 查询工单
    pub fn get_work_order(&self, work_order_id: i64) -> ApiResult<WorkOrder> {
        self.work_order_repo
            .find_by_id(work_order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("工单 id={} 不存在", work_order_id)))
    }

    /// 查询工单的全部报工记录（按开始时间排序）
    pub fn list_operations(&self, work_order_id: i64) -> ApiResult<Vec<Operation>> {
        let ops = self.operation_repo.list_by_work_order(work_order_id)?;
        Ok(ops)
    }
}
