//! Definitions of the Solidity interfaces the scripts call into

use alloy::sol;

sol! {
    /// The methods of the `FundMe` contract used by the interaction scripts
    #[sol(rpc)]
    interface FundMe {
        function fund() external payable;
        function withdraw() external;
        function getOwner() external view returns (address);
        function getPriceFeed() external view returns (address);
    }
}
